//! Tracked event records emitted by the ready-made trackers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serialization::{self, Format};
use crate::{Payload, Result};

/// One tracking callback invocation, captured as data
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrackedEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// When the event was captured
    pub timestamp: DateTime<Utc>,

    /// Type of the tracked action
    pub action_type: String,

    /// Action fields without `type` and `reduxTrack`
    pub payload: Payload,
}

impl TrackedEvent {
    /// Capture an event with a fresh id and the current time
    pub fn new(action_type: impl Into<String>, payload: &Payload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            action_type: action_type.into(),
            payload: payload.clone(),
        }
    }

    /// Encode the event
    pub fn encode(&self, format: Format) -> Result<Vec<u8>> {
        serialization::serialize(self, format)
    }

    /// Decode an event produced by [`TrackedEvent::encode`]
    pub fn decode(bytes: &[u8], format: Format) -> Result<Self> {
        serialization::deserialize(bytes, format)
    }
}
