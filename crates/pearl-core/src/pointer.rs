//! Process-wide click bus.
//!
//! Overlay widgets (dropdowns, modals, slideout menus) close when the user
//! clicks somewhere else. Rather than every widget reading the terminal on
//! its own, the [`terminal_events`](crate::subscriptions::terminal_events)
//! subscription publishes each left-button press once on the global
//! [`ClickBus`], and every interested widget instance declares a
//! [`clicks`] subscription while it is mounted. The runtime's subscription
//! diffing registers the listener when the widget starts returning it and
//! drops it when the widget stops, so no listener outlives its widget.
//!
//! The bus never decides what "outside" means: each widget receives every
//! click and compares it against the region it last rendered.

use crate::event::Click;
use crate::subscription::{Subscription, SubscriptionId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use tokio::sync::broadcast;
use tokio::sync::mpsc;

const CAPACITY: usize = 64;

static GLOBAL: OnceLock<ClickBus> = OnceLock::new();
static NEXT_LISTENER: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique id for a widget instance's click listener.
pub fn next_listener_id() -> u64 {
    NEXT_LISTENER.fetch_add(1, Ordering::Relaxed)
}

/// Broadcast channel of left-button presses.
#[derive(Clone)]
pub struct ClickBus {
    tx: broadcast::Sender<Click>,
}

impl ClickBus {
    /// A private bus, mostly useful in tests. Applications use [`ClickBus::global`].
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CAPACITY);
        Self { tx }
    }

    /// The bus shared by the whole process, created on first use.
    pub fn global() -> &'static ClickBus {
        GLOBAL.get_or_init(ClickBus::new)
    }

    /// Publish a click. Returns how many listeners received it.
    pub fn publish(&self, click: Click) -> usize {
        self.tx.send(click).unwrap_or(0)
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn listen(&self) -> broadcast::Receiver<Click> {
        self.tx.subscribe()
    }
}

impl Default for ClickBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Clicks from the global bus for the widget instance `listener`.
pub fn clicks(listener: u64) -> Subscription<Click> {
    clicks_on(ClickBus::global().clone(), listener)
}

/// Clicks from a specific bus.
pub fn clicks_on(bus: ClickBus, listener: u64) -> Subscription<Click> {
    Subscription {
        id: SubscriptionId::new::<ClickBus>(listener),
        // The receiver is created inside spawn so declaring the subscription
        // on every update does not register throwaway listeners.
        spawn: Box::new(move |tx: mpsc::UnboundedSender<Click>| {
            let mut rx = bus.listen();
            let handle = tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(click) => {
                            if tx.send(click).is_err() {
                                break;
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            tracing::debug!(listener, missed, "click listener lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
            });
            handle.abort_handle()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_ids_are_unique() {
        let a = next_listener_id();
        let b = next_listener_id();
        assert_ne!(a, b);
    }

    #[test]
    fn publish_without_listeners_is_harmless() {
        let bus = ClickBus::new();
        assert_eq!(bus.publish(Click::new(0, 0)), 0);
    }

    #[tokio::test]
    async fn subscription_receives_published_clicks() {
        let bus = ClickBus::new();
        let sub = clicks_on(bus.clone(), 1);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let abort = (sub.spawn)(tx);
        assert_eq!(bus.listener_count(), 1);

        bus.publish(Click::new(4, 2));
        assert_eq!(rx.recv().await, Some(Click::new(4, 2)));

        abort.abort();
        // Give the aborted task a chance to drop its receiver.
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn ids_differ_per_listener() {
        let a = clicks_on(ClickBus::new(), 1);
        let b = clicks_on(ClickBus::new(), 2);
        assert_ne!(a.id(), b.id());
    }
}
