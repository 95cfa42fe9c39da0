use crate::command::{Action, Command, CommandInner, TerminalCommand};
use crate::defer::DeferQueue;
use futures::future::BoxFuture;
use std::collections::VecDeque;

/// Upper bound on deferred rounds per dispatch. A widget that keeps
/// rescheduling itself would otherwise starve the event loop.
const MAX_DEFER_ROUNDS: usize = 64;

/// Side effects collected while dispatching one message.
///
/// Shared by the real runtime and the headless test harnesses so both
/// deliver immediate and deferred messages in the same order.
pub(crate) struct Effects<Msg: Send + 'static> {
    ready: VecDeque<Msg>,
    deferred: DeferQueue<Msg>,
    pub futures: Vec<BoxFuture<'static, Msg>>,
    pub terminal: Vec<TerminalCommand>,
    pub quit: bool,
}

impl<Msg: Send + 'static> Effects<Msg> {
    pub fn new() -> Self {
        Self {
            ready: VecDeque::new(),
            deferred: DeferQueue::new(),
            futures: Vec::new(),
            terminal: Vec::new(),
            quit: false,
        }
    }

    pub fn push(&mut self, msg: Msg) {
        self.ready.push_back(msg);
    }

    pub fn absorb(&mut self, cmd: Command<Msg>) {
        match cmd.inner {
            CommandInner::None => {}
            CommandInner::Action(Action::Message(msg)) => self.ready.push_back(msg),
            CommandInner::Action(Action::Quit) => self.quit = true,
            CommandInner::Future(fut) => self.futures.push(fut),
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    self.absorb(cmd);
                }
            }
            CommandInner::Deferred(deferred) => self.deferred.push(deferred),
            CommandInner::Terminal(tcmd) => self.terminal.push(tcmd),
        }
    }

    /// Deliver queued immediate messages until none are left.
    pub fn run_ready(&mut self, update: &mut impl FnMut(Msg) -> Command<Msg>) {
        while let Some(msg) = self.ready.pop_front() {
            let cmd = update(msg);
            self.absorb(cmd);
        }
    }

    /// Deliver deferred continuations round by round, each round followed by
    /// the immediate messages it produced.
    pub fn run_deferred(&mut self, update: &mut impl FnMut(Msg) -> Command<Msg>) {
        let mut rounds = 0;
        while !self.deferred.is_empty() {
            rounds += 1;
            if rounds > MAX_DEFER_ROUNDS {
                tracing::warn!(
                    pending = self.deferred.len(),
                    "deferred continuations kept rescheduling, dropping the rest"
                );
                self.deferred = DeferQueue::new();
                break;
            }
            for msg in self.deferred.take_round() {
                self.ready.push_back(msg);
            }
            self.run_ready(update);
        }
    }

    /// A full dispatch: immediate messages first, then deferred rounds.
    pub fn settle(&mut self, mut update: impl FnMut(Msg) -> Command<Msg>) {
        self.run_ready(&mut update);
        self.run_deferred(&mut update);
    }

    pub fn has_deferred(&self) -> bool {
        !self.deferred.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defer::CancelToken;

    #[test]
    fn immediate_before_deferred() {
        let mut effects = Effects::new();
        let mut log = Vec::new();
        effects.push("start");
        effects.settle(|msg| {
            log.push(msg);
            match msg {
                "start" => Command::batch([
                    Command::defer(CancelToken::new(), "later"),
                    Command::message("now"),
                ]),
                _ => Command::none(),
            }
        });
        assert_eq!(log, vec!["start", "now", "later"]);
    }

    #[test]
    fn continuation_scheduled_while_draining_runs_next_round() {
        let mut effects = Effects::new();
        let mut log = Vec::new();
        effects.push(0u8);
        effects.settle(|n| {
            log.push(n);
            if n < 3 {
                Command::defer(CancelToken::new(), n + 1)
            } else {
                Command::none()
            }
        });
        assert_eq!(log, vec![0, 1, 2, 3]);
        assert!(!effects.has_deferred());
    }

    #[test]
    fn cancelled_continuation_never_runs() {
        let mut effects = Effects::new();
        let token = CancelToken::new();
        effects.absorb(Command::defer(token.clone(), 1));
        token.cancel();
        let mut seen = Vec::new();
        effects.settle(|n| {
            seen.push(n);
            Command::none()
        });
        assert!(seen.is_empty());
    }

    #[test]
    fn runaway_rescheduling_is_bounded() {
        let mut effects = Effects::new();
        let mut count = 0;
        effects.push(());
        effects.settle(|_| {
            count += 1;
            Command::defer(CancelToken::new(), ())
        });
        assert_eq!(count, MAX_DEFER_ROUNDS + 1);
        assert!(!effects.has_deferred());
    }

    #[test]
    fn quit_and_terminal_collected() {
        let mut effects: Effects<()> = Effects::new();
        effects.absorb(Command::batch([Command::quit(), Command::set_title("x")]));
        assert!(effects.quit);
        assert_eq!(effects.terminal, vec![TerminalCommand::SetTitle("x".into())]);
    }
}
