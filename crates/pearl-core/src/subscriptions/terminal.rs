use crate::event::TerminalEvent;
use crate::pointer::ClickBus;
use crate::subscription::{Subscription, SubscriptionId};
use crossterm::event::EventStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Marker type identifying the terminal event subscription.
pub struct TerminalEvents;

/// Subscribe to terminal events, mapping each through `map`.
///
/// Return `None` from `map` to discard an event. Clicks reach the
/// [`ClickBus`] regardless of what `map` does with them, so widgets that
/// listen for outside clicks work even when the application ignores mouse
/// input.
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     let mut subs = vec![terminal_events(|event| match event {
///         TerminalEvent::Key(key) => Some(Msg::Key(key)),
///         _ => None,
///     })];
///     subs.extend(self.country.subscriptions().into_iter().map(|s| s.map(Msg::Country)));
///     subs
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    let map = Arc::new(map);

    // EventStream is created inside the task: building it on every
    // subscriptions() call would poke crossterm's global reader and disturb
    // the stream that is already running.
    Subscription {
        id: SubscriptionId::of::<TerminalEvents>(),
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Msg>| -> AbortHandle {
            let handle = tokio::spawn(async move {
                let bus = ClickBus::global();
                let mut stream = EventStream::new();
                while let Some(result) = stream.next().await {
                    let event = match result {
                        Ok(event) => TerminalEvent::from(event),
                        Err(err) => {
                            tracing::warn!(%err, "terminal event stream error");
                            continue;
                        }
                    };
                    if let Some(click) = event.click() {
                        let delivered = bus.publish(click);
                        tracing::trace!(?click, delivered, "click published");
                    }
                    if let Some(msg) = map(event) {
                        if tx.send(msg).is_err() {
                            break;
                        }
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}
