//! Simulation events and the sinks that observe them.
//!
//! Workers publish a `SimEvent` for every state change; a sink renders or
//! records it. Sinks own the output lock, so one event is always written as
//! one uninterrupted unit even when many workers emit concurrently.
//!
//! # Architecture
//!
//! ```text
//! Producer / Consumer
//!      ↓
//! SyncCore (enqueue/dequeue events under the queue lock)
//!      ↓
//! EventSink::emit()
//!      ↓
//! ConsoleSink (text or JSON lines) | RecordingSink (tests) | NullSink
//! ```

mod event;
mod sink;

pub use event::{DoneReason, EventKind, SimEvent, WorkerId};
pub use sink::{ConsoleSink, EventSink, NullSink, OutputFormat, RecordingSink};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enqueued() -> SimEvent {
        SimEvent::JobEnqueued {
            producer_id: 1,
            job_id: 2,
            serial: 5,
            duration: 7,
        }
    }

    #[test]
    fn test_event_text_matches_console_wording() {
        assert_eq!(enqueued().to_string(), "Producer(1): Job id 2 duration 7");
        let dequeued = SimEvent::JobDequeued {
            consumer_id: 3,
            job_id: 2,
            serial: 5,
            duration: 7,
        };
        assert_eq!(
            dequeued.to_string(),
            "Consumer(3): Job id 2 executing sleep duration 7"
        );
        let completed = SimEvent::JobCompleted {
            consumer_id: 3,
            job_id: 2,
            serial: 5,
        };
        assert_eq!(completed.to_string(), "Consumer(3): Job id 2 completed");
        let done = SimEvent::ProducerDone {
            producer_id: 1,
            produced: 4,
            reason: DoneReason::QuotaMet,
        };
        assert_eq!(done.to_string(), "Producer(1): I am done producing jobs....");
    }

    #[test]
    fn test_event_json_is_tagged() {
        let value = serde_json::to_value(enqueued()).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "job_enqueued",
                "producer_id": 1,
                "job_id": 2,
                "serial": 5,
                "duration": 7
            })
        );

        let done = SimEvent::ConsumerDone {
            consumer_id: 2,
            consumed: 0,
            reason: DoneReason::IdleTimeout,
        };
        let value = serde_json::to_value(&done).unwrap();
        assert_eq!(value["reason"], "idle_timeout");

        let back: SimEvent = serde_json::from_value(value).unwrap();
        assert_eq!(back, done);
    }

    #[test]
    fn test_event_kind_and_worker() {
        assert_eq!(enqueued().kind(), EventKind::JobEnqueued);
        assert_eq!(enqueued().kind().as_str(), "job_enqueued");
        assert_eq!(enqueued().serial(), Some(5));
        assert_eq!(SimEvent::AllJobsDispatched.serial(), None);
    }

    #[test]
    fn test_recording_sink_counts() {
        let sink = RecordingSink::new();
        sink.emit(&enqueued());
        sink.emit(&enqueued());
        sink.emit(&SimEvent::AllJobsDispatched);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.count(EventKind::JobEnqueued), 2);
        assert_eq!(sink.count(EventKind::JobCompleted), 0);
        assert_eq!(sink.events()[2], SimEvent::AllJobsDispatched);
    }

    #[test]
    fn test_console_sink_writes_one_line_per_event() {
        let sink = ConsoleSink::new(Vec::new(), OutputFormat::Text);
        sink.emit(&enqueued());
        sink.emit(&SimEvent::AllJobsDispatched);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Producer(1): Job id 2 duration 7");
        assert!(lines[1].starts_with("No new jobs coming in"));
    }

    #[test]
    fn test_console_sink_json_lines() {
        let sink = ConsoleSink::new(Vec::new(), OutputFormat::Json);
        sink.emit(&enqueued());
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let parsed: SimEvent = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(parsed, enqueued());
    }

    #[test]
    fn test_null_sink_accepts_events() {
        NullSink.emit(&enqueued());
    }
}
