use crate::subscription::{SubscriptionId, SubscriptionSource};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::time::{Duration, Instant};

/// A repeating timer that fires at a fixed interval.
///
/// The `id` distinguishes timers from each other; two widgets animating at
/// the same rate need different ids.
///
/// ```rust,ignore
/// let sub = subscribe(Every::new(Duration::from_millis(80), "activity"))
///     .map(|_| Message::Frame);
/// ```
pub struct Every {
    pub interval: Duration,
    pub id: SubscriptionId,
}

impl Every {
    pub fn new(interval: Duration, id: &str) -> Self {
        Self {
            interval,
            id: SubscriptionId::with_str::<Self>(id),
        }
    }

    /// A timer keyed by a widget instance number.
    pub fn for_instance(interval: Duration, instance: u64) -> Self {
        Self {
            interval,
            id: SubscriptionId::new::<Self>(instance),
        }
    }
}

impl SubscriptionSource for Every {
    type Output = Instant;

    fn id(&self) -> SubscriptionId {
        self.id.clone()
    }

    fn stream(self) -> BoxStream<'static, Instant> {
        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick of a tokio interval completes immediately; skip it so
        // the first frame arrives one interval after subscribing.
        let stream = tokio_stream::wrappers::IntervalStream::new(interval)
            .skip(1)
            .map(|tick| tick.into_std());
        Box::pin(stream)
    }
}
