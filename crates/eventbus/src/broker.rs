//! Per-run publish/subscribe fan-out.

use dashmap::DashMap;
use nebula_core::id::RunId;
use tokio::sync::broadcast;

use crate::event::Event;

const DEFAULT_CAPACITY: usize = 256;

/// In-memory per-run event fan-out. Mutation of the `run_id -> sender`
/// mapping (subscribe/unsubscribe/close) is guarded by the map's own
/// per-shard locking; per-run publish iterates a snapshot of subscribers,
/// so a slow subscriber can never block the engine.
pub struct Broker {
    channels: DashMap<RunId, broadcast::Sender<Event>>,
    capacity: usize,
}

impl Default for Broker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Broker {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            capacity,
        }
    }

    /// Returns a live subscription to `run_id`, creating its channel if this
    /// is the first subscriber. Publishing to a run with no subscribers
    /// yet (or ever) is a no-op — events are not buffered beyond this
    /// channel's bounded capacity.
    pub fn subscribe(&self, run_id: RunId) -> Subscriber {
        let sender = self
            .channels
            .entry(run_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone();
        Subscriber {
            receiver: sender.subscribe(),
        }
    }

    /// Fans `event` out to all current subscribers of `run_id`. A no-op if
    /// nobody is subscribed.
    pub fn publish(&self, run_id: RunId, event: Event) {
        if let Some(sender) = self.channels.get(&run_id) {
            let _ = sender.send(event);
        }
    }

    /// Drops the channel for `run_id`. Current subscribers observe
    /// end-of-stream on their next receive; this is called once after the
    /// terminal event has been published.
    pub fn close(&self, run_id: RunId) {
        self.channels.remove(&run_id);
    }

    #[must_use]
    pub fn subscriber_count(&self, run_id: RunId) -> usize {
        self.channels
            .get(&run_id)
            .map_or(0, |sender| sender.receiver_count())
    }
}

/// Subscription handle for one run's event stream.
pub struct Subscriber {
    receiver: broadcast::Receiver<Event>,
}

/// One delivered event, flagged `lossy` if the subscriber's buffer
/// overflowed and the broker dropped events since the last receive.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub event: Event,
    pub lossy: bool,
}

impl Subscriber {
    /// Waits for the next event. Returns `None` once the run's channel is
    /// closed (after the terminal event). A buffer overflow since the last
    /// receive is surfaced as `lossy = true` on the next successfully
    /// received event, rather than silently skipped.
    pub async fn recv(&mut self) -> Option<Delivery> {
        let mut lossy = false;
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(Delivery { event, lossy }),
                Err(broadcast::error::RecvError::Lagged(_)) => lossy = true,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
