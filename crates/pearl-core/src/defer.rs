//! Deferred continuations with cancellation.
//!
//! Some state changes must not happen while the current input event is
//! still being handled: an expand triggered by a click has to land *after*
//! the click bus has told every other widget about that same click, and a
//! focus move has to land after the state change it belongs to. Widgets
//! express this with [`Command::defer`](crate::Command::defer), which the
//! runtime parks in a [`DeferQueue`] and delivers once the dispatch that
//! scheduled it has finished.
//!
//! Every deferred message carries a [`CancelToken`]. A [`DeferSlot`] keeps
//! at most one live token per purpose, so scheduling a new continuation
//! cancels the stale one instead of letting both fire.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for one deferred continuation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the continuation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A message waiting for the current dispatch to finish.
pub struct Deferred<Msg> {
    token: CancelToken,
    msg: Msg,
}

impl<Msg> Deferred<Msg> {
    pub(crate) fn new(token: CancelToken, msg: Msg) -> Self {
        Self { token, msg }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn map<NewMsg>(self, f: impl FnOnce(Msg) -> NewMsg) -> Deferred<NewMsg> {
        Deferred {
            token: self.token,
            msg: f(self.msg),
        }
    }

    pub fn into_parts(self) -> (CancelToken, Msg) {
        (self.token, self.msg)
    }
}

/// Holds the single live continuation for one purpose (e.g. "toggle" or
/// "focus") of one widget.
#[derive(Debug, Default)]
pub struct DeferSlot {
    pending: Option<CancelToken>,
}

impl DeferSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and hand out a fresh token.
    pub fn schedule(&mut self) -> CancelToken {
        self.cancel();
        let token = CancelToken::new();
        self.pending = Some(token.clone());
        token
    }

    /// Cancel the pending continuation, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    /// Mark the pending continuation as delivered. Call this from the
    /// handler of the deferred message.
    pub fn finish(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|t| !t.is_cancelled())
    }
}

/// FIFO of deferred messages, drained in rounds.
///
/// A round is everything queued at the moment [`take_round`](Self::take_round)
/// is called; continuations scheduled while a round runs belong to the next
/// one.
pub struct DeferQueue<Msg> {
    pending: VecDeque<Deferred<Msg>>,
}

impl<Msg> DeferQueue<Msg> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn push(&mut self, deferred: Deferred<Msg>) {
        self.pending.push_back(deferred);
    }

    /// Remove the current round, dropping cancelled entries.
    pub fn take_round(&mut self) -> Vec<Msg> {
        let round: Vec<_> = self.pending.drain(..).collect();
        let total = round.len();
        let live: Vec<Msg> = round
            .into_iter()
            .filter(|d| !d.is_cancelled())
            .map(|d| d.msg)
            .collect();
        if live.len() < total {
            tracing::trace!(dropped = total - live.len(), "skipped cancelled continuations");
        }
        live
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<Msg> Default for DeferQueue<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_cancel_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn slot_schedule_cancels_previous() {
        let mut slot = DeferSlot::new();
        let first = slot.schedule();
        let second = slot.schedule();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        assert!(slot.is_pending());
    }

    #[test]
    fn slot_finish_clears_without_cancelling() {
        let mut slot = DeferSlot::new();
        let token = slot.schedule();
        slot.finish();
        assert!(!slot.is_pending());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn queue_preserves_order_and_skips_cancelled() {
        let mut queue = DeferQueue::new();
        let stale = CancelToken::new();
        queue.push(Deferred::new(CancelToken::new(), 1));
        queue.push(Deferred::new(stale.clone(), 2));
        queue.push(Deferred::new(CancelToken::new(), 3));
        stale.cancel();

        assert_eq!(queue.take_round(), vec![1, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn rounds_are_separate() {
        let mut queue = DeferQueue::new();
        queue.push(Deferred::new(CancelToken::new(), "a"));
        let round = queue.take_round();
        queue.push(Deferred::new(CancelToken::new(), "b"));
        assert_eq!(round, vec!["a"]);
        assert_eq!(queue.len(), 1);
    }
}
