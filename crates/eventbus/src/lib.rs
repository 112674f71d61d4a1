//! In-memory per-run event fan-out with backpressure and late-join replay.

mod broker;
mod event;
mod replay;

pub use broker::{Broker, Delivery, Subscriber};
pub use event::Event;
pub use replay::synthesize_terminal_event;
