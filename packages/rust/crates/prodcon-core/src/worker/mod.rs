//! Worker lifecycle: producers and consumers as two-state machines.
//!
//! Each worker repeats `step()` while it is `Working`; the first step that
//! returns `Done` ends the loop and the worker reports itself to the sink.

mod consumer;
mod pacing;
mod producer;
mod types;

pub use consumer::Consumer;
pub use pacing::Pacing;
pub use producer::Producer;
pub use types::{ConsumerOutcome, ProducerOutcome, WorkerOutcome, WorkerState};
