use futures::stream::BoxStream;
use futures::StreamExt;
use std::any::TypeId;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// A long-lived event source managed by the runtime.
///
/// Subscriptions are declared from [`Model::subscriptions`](crate::Model::subscriptions)
/// (and collected from child components) after every update. The runtime
/// diffs the declared set against the running set by [`SubscriptionId`]:
/// new ids are started, missing ids are aborted. Returning a subscription is
/// therefore how a widget registers a listener, and no longer returning it is
/// how the listener is torn down.
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) spawn: Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>,
}

/// Identity used to diff subscriptions between update cycles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    type_id: TypeId,
    discriminant: u64,
}

impl SubscriptionId {
    /// An id from a type and a numeric discriminant (e.g. a widget instance id).
    pub fn new<T: 'static>(discriminant: u64) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            discriminant,
        }
    }

    /// An id from a type alone, for process-wide singletons.
    pub fn of<T: 'static>() -> Self {
        Self::new::<T>(0)
    }

    /// An id from a type and a string discriminant.
    pub fn with_str<T: 'static>(s: &str) -> Self {
        let mut hasher = std::hash::DefaultHasher::new();
        s.hash(&mut hasher);
        Self::new::<T>(hasher.finish())
    }
}

/// Types that produce a stream of values for a subscription.
pub trait SubscriptionSource: Send + 'static {
    type Output: Send + 'static;

    fn id(&self) -> SubscriptionId;

    /// Called once, when the subscription is first started.
    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Create a [`Subscription`] from a [`SubscriptionSource`].
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    let id = source.id();
    Subscription {
        id,
        spawn: Box::new(move |tx| forward(source.stream(), tx)),
    }
}

fn forward<Msg: Send + 'static>(
    stream: BoxStream<'static, Msg>,
    tx: mpsc::UnboundedSender<Msg>,
) -> AbortHandle {
    let handle = tokio::spawn(async move {
        let mut stream = stream;
        while let Some(msg) = stream.next().await {
            if tx.send(msg).is_err() {
                break;
            }
        }
    });
    handle.abort_handle()
}

impl<Msg: Send + 'static> Subscription<Msg> {
    /// Create from an already-built stream.
    pub fn from_stream(id: SubscriptionId, stream: BoxStream<'static, Msg>) -> Self {
        Subscription {
            id,
            spawn: Box::new(move |tx| forward(stream, tx)),
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Subscription<NewMsg> {
        let f = Arc::new(f);
        Subscription {
            id: self.id,
            spawn: Box::new(move |new_tx: mpsc::UnboundedSender<NewMsg>| {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel::<Msg>();
                let abort = (self.spawn)(inner_tx);

                // Ends on its own once the source is aborted and inner_tx drops.
                tokio::spawn(async move {
                    while let Some(msg) = inner_rx.recv().await {
                        if new_tx.send(f(msg)).is_err() {
                            break;
                        }
                    }
                });

                abort
            }),
        }
    }
}

/// Running subscriptions, reconciled after every update.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    active: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            active: HashMap::new(),
            msg_tx,
        }
    }

    /// Start declared-but-not-running subscriptions, abort running-but-not-declared ones.
    pub fn reconcile(&mut self, declared: Vec<Subscription<Msg>>) {
        let mut declared: HashMap<SubscriptionId, Subscription<Msg>> =
            declared.into_iter().map(|s| (s.id.clone(), s)).collect();

        self.active.retain(|id, handle| {
            let keep = declared.contains_key(id);
            if !keep {
                tracing::trace!(?id, "stopping subscription");
                handle.abort();
            }
            keep
        });

        for (id, sub) in declared.drain() {
            if !self.active.contains_key(&id) {
                tracing::trace!(?id, "starting subscription");
                let handle = (sub.spawn)(self.msg_tx.clone());
                self.active.insert(id, handle);
            }
        }
    }

    pub fn shutdown(&mut self) {
        for (_, handle) in self.active.drain() {
            handle.abort();
        }
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_sub(id: SubscriptionId) -> Subscription<i32> {
        Subscription::from_stream(id, Box::pin(futures::stream::pending()))
    }

    #[test]
    fn ids_compare_by_type_and_discriminant() {
        assert_eq!(SubscriptionId::of::<String>(), SubscriptionId::of::<String>());
        assert_ne!(SubscriptionId::of::<String>(), SubscriptionId::of::<i32>());
        assert_ne!(SubscriptionId::new::<String>(1), SubscriptionId::new::<String>(2));
        assert_eq!(
            SubscriptionId::with_str::<String>("tick"),
            SubscriptionId::with_str::<String>("tick")
        );
    }

    #[tokio::test]
    async fn reconcile_starts_and_stops() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);

        manager.reconcile(vec![pending_sub(SubscriptionId::new::<String>(1))]);
        assert_eq!(manager.active_count(), 1);

        manager.reconcile(vec![]);
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn reconcile_keeps_existing() {
        let (tx, _rx) = mpsc::unbounded_channel::<i32>();
        let mut manager = SubscriptionManager::new(tx);
        let id = SubscriptionId::new::<String>(7);

        manager.reconcile(vec![pending_sub(id.clone())]);
        manager.reconcile(vec![pending_sub(id)]);
        assert_eq!(manager.active_count(), 1);

        manager.shutdown();
        assert_eq!(manager.active_count(), 0);
    }

    #[tokio::test]
    async fn mapped_subscription_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let sub = Subscription::from_stream(
            SubscriptionId::of::<u8>(),
            Box::pin(futures::stream::iter(vec![1, 2])),
        )
        .map(|n: i32| format!("n={n}"));

        let _abort = (sub.spawn)(tx);
        assert_eq!(rx.recv().await.as_deref(), Some("n=1"));
        assert_eq!(rx.recv().await.as_deref(), Some("n=2"));
    }
}
