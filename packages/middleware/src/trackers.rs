//! Ready-made trackers
//!
//! Channel trackers never block: they hand the event to an unbounded
//! channel and return, so the consumer runs after the dispatch completes.

use log::{log, Level};
use tokio::sync::mpsc::UnboundedSender;

use crate::event::TrackedEvent;
use crate::serialization::Format;
use crate::{Error, Tracker};

/// Tracker that writes every tracked action to the `log` facade
pub fn log_tracker(level: Level) -> Tracker {
    Tracker::observe(move |action_type, payload| {
        log!(
            level,
            "Tracked action: {} {}",
            action_type,
            serde_json::Value::Object(payload.clone())
        );
    })
}

/// Tracker that sends a [`TrackedEvent`] for every tracked action
///
/// Fails with [`Error::ChannelClosed`] once the receiver is dropped.
pub fn channel_tracker(tx: UnboundedSender<TrackedEvent>) -> Tracker {
    Tracker::new(move |action_type, payload| {
        tx.send(TrackedEvent::new(action_type, payload))
            .map_err(|_| Error::ChannelClosed)
    })
}

/// Tracker that sends every tracked action as an encoded [`TrackedEvent`]
pub fn encoded_channel_tracker(format: Format, tx: UnboundedSender<Vec<u8>>) -> Tracker {
    Tracker::new(move |action_type, payload| {
        let bytes = TrackedEvent::new(action_type, payload).encode(format)?;
        tx.send(bytes).map_err(|_| Error::ChannelClosed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Payload;
    use serde_json::json;
    use tokio::sync::mpsc;

    fn payload() -> Payload {
        let mut payload = Payload::new();
        payload.insert("otherStuff".to_string(), json!([1, 2, 3]));
        payload
    }

    #[test]
    fn test_log_tracker_never_fails() {
        let _ = env_logger::builder().is_test(true).try_init();
        let tracker = log_tracker(Level::Info);
        assert!(tracker.call("ACTION", &mut payload()).is_ok());
    }

    #[tokio::test]
    async fn test_channel_tracker_sends_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tracker = channel_tracker(tx);

        tracker.call("ACTION", &mut payload()).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.action_type, "ACTION");
        assert_eq!(event.payload, payload());
    }

    #[test]
    fn test_channel_tracker_reports_closed_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let tracker = channel_tracker(tx);

        assert!(matches!(
            tracker.call("ACTION", &mut payload()),
            Err(Error::ChannelClosed)
        ));
    }

    #[test]
    fn test_encoded_channel_tracker_sends_bytes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tracker = encoded_channel_tracker(Format::MessagePack, tx);

        tracker.call("ACTION", &mut payload()).unwrap();

        let bytes = tokio_test::block_on(rx.recv()).unwrap();
        let event = TrackedEvent::decode(&bytes, Format::MessagePack).unwrap();
        assert_eq!(event.action_type, "ACTION");
        assert_eq!(event.payload, payload());
    }
}
