use crate::defer::{CancelToken, Deferred};
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A side effect returned from [`Model::update`](crate::Model::update) or
/// [`Component::update`](crate::Component::update).
///
/// Commands describe work the runtime performs on the model's behalf:
/// delivering a message right away, delivering one after the current
/// dispatch has finished ([`Command::defer`]), awaiting a future, driving the
/// terminal, or quitting.
///
/// # Examples
///
/// ```rust,ignore
/// // Notify the parent immediately:
/// let cmd = Command::message(Msg::Changed(value));
///
/// // Run once the current key press has been fully handled:
/// let token = self.focus_slot.schedule();
/// let cmd = Command::defer(token, Msg::TransferFocus(FocusTarget::Toggle));
///
/// // Redraw an animation frame later:
/// let cmd = Command::tick(Duration::from_millis(16), |_| Msg::Frame);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Future(BoxFuture<'static, Msg>),
    Batch(Vec<Command<Msg>>),
    Deferred(Deferred<Msg>),
    Terminal(TerminalCommand),
}

/// Actions the runtime handles synchronously, without spawning a task.
pub enum Action<Msg> {
    /// Deliver a message as part of the current dispatch.
    Message(Msg),
    /// Stop the program.
    Quit,
}

/// Terminal management commands executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Start reporting mouse clicks (required for the click bus).
    EnableMouseCapture,
    /// Stop reporting mouse events.
    DisableMouseCapture,
    /// Make the terminal cursor visible.
    ShowCursor,
    /// Hide the terminal cursor.
    HideCursor,
    /// Set the terminal window title.
    SetTitle(String),
    /// Clear the entire screen.
    ClearScreen,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Await a future on the runtime and deliver its mapped output.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Command {
            inner: CommandInner::Future(Box::pin(async move { map(future.await) })),
        }
    }

    /// Deliver a message as part of the current dispatch.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Deliver `msg` after the current dispatch completes, unless `token`
    /// has been cancelled by then.
    ///
    /// "The current dispatch" is the message being handled plus every
    /// message it produced through [`Command::message`]. Deferred messages
    /// run in the order they were scheduled.
    pub fn defer(token: CancelToken, msg: Msg) -> Self {
        Command {
            inner: CommandInner::Deferred(Deferred::new(token, msg)),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Combine several commands. Empty input collapses to [`Command::none`],
    /// a single command is returned as is.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Terminal management command.
    pub fn terminal(cmd: TerminalCommand) -> Self {
        Command {
            inner: CommandInner::Terminal(cmd),
        }
    }

    /// One-shot timer: fires once after `duration`.
    pub fn tick(duration: Duration, map: impl FnOnce(Instant) -> Msg + Send + 'static) -> Self {
        Command {
            inner: CommandInner::Future(Box::pin(async move {
                tokio::time::sleep(duration).await;
                map(Instant::now())
            })),
        }
    }

    /// Lift the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_with(Arc::new(f))
    }

    fn map_with<NewMsg: Send + 'static>(
        self,
        f: Arc<dyn Fn(Msg) -> NewMsg + Send + Sync>,
    ) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Action(Action::Message(msg)) => CommandInner::Action(Action::Message(f(msg))),
            CommandInner::Action(Action::Quit) => CommandInner::Action(Action::Quit),
            CommandInner::Future(fut) => {
                CommandInner::Future(Box::pin(async move { f(fut.await) }))
            }
            CommandInner::Batch(cmds) => CommandInner::Batch(
                cmds.into_iter()
                    .map(|cmd| cmd.map_with(f.clone()))
                    .collect(),
            ),
            CommandInner::Deferred(deferred) => CommandInner::Deferred(deferred.map(|m| f(m))),
            CommandInner::Terminal(tcmd) => CommandInner::Terminal(tcmd),
        };
        Command { inner }
    }

    /// Shorthand for enabling mouse capture.
    pub fn enable_mouse_capture() -> Self {
        Command::terminal(TerminalCommand::EnableMouseCapture)
    }

    /// Shorthand for setting the window title.
    pub fn set_title(title: impl Into<String>) -> Self {
        Command::terminal(TerminalCommand::SetTitle(title.into()))
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is an immediate message action, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a deferred message, return its token and message.
    pub fn into_deferred(self) -> Option<(CancelToken, Msg)> {
        match self.inner {
            CommandInner::Deferred(deferred) => Some(deferred.into_parts()),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// Whether this command quits the program.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Action(Action::Quit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_drops_noops() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::none()]);
        assert!(cmd.is_none());
    }

    #[test]
    fn batch_single_unwraps() {
        let cmd: Command<i32> = Command::batch(vec![Command::none(), Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn batch_multiple() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        assert_eq!(cmd.into_batch().map(|c| c.len()), Some(2));
    }

    #[test]
    fn map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message().as_deref(), Some("42"));
    }

    #[test]
    fn map_keeps_quit() {
        let cmd: Command<i32> = Command::quit();
        assert!(cmd.map(|n| n + 1).is_quit());
    }

    #[test]
    fn map_deferred_keeps_token() {
        let token = CancelToken::new();
        let cmd: Command<i32> = Command::defer(token.clone(), 7);
        let mapped = cmd.map(|n| n * 2);
        let (mapped_token, msg) = mapped.into_deferred().expect("deferred");
        assert_eq!(msg, 14);
        token.cancel();
        assert!(mapped_token.is_cancelled());
    }

    #[test]
    fn map_terminal_preserved() {
        let cmd: Command<i32> = Command::enable_mouse_capture();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(matches!(
            mapped.inner,
            CommandInner::Terminal(TerminalCommand::EnableMouseCapture)
        ));
    }

    #[test]
    fn set_title_carries_text() {
        let cmd: Command<()> = Command::set_title("pearl");
        match cmd.inner {
            CommandInner::Terminal(TerminalCommand::SetTitle(s)) => assert_eq!(s, "pearl"),
            _ => panic!("Expected SetTitle"),
        }
    }
}
