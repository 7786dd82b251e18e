//! Actions and the tracking callbacks they can carry
//!
//! An [`Action`] mirrors the JSON shape of a Redux action: a `type` string and
//! any number of additional fields. The reserved `reduxTrack` slot is kept
//! next to the JSON fields as a typed [`Track`], because callbacks are not data.

use std::fmt;
use std::sync::Arc;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// Key holding the action type
pub const TYPE_KEY: &str = "type";

/// Key holding the tracking callbacks
pub const TRACK_KEY: &str = "reduxTrack";

/// Keys removed from an action when its payload is built
pub const RESERVED_KEYS: [&str; 2] = [TYPE_KEY, TRACK_KEY];

/// Fields of an action handed to tracking callbacks
pub type Payload = Map<String, JsonValue>;

type TrackFn = dyn Fn(&str, &mut Payload) -> Result<()> + Send + Sync;

/// A tracking callback invoked as `(action_type, payload)`
///
/// The payload is shared by every tracker of a single dispatch, so a
/// change made by one tracker is seen by the ones after it.
#[derive(Clone)]
pub struct Tracker(Arc<TrackFn>);

impl Tracker {
    /// Create a tracker from a fallible callback
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &mut Payload) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Create a tracker that only reads the payload and cannot fail
    pub fn observe<F>(f: F) -> Self
    where
        F: Fn(&str, &Payload) + Send + Sync + 'static,
    {
        Self::new(move |action_type, payload| {
            f(action_type, &*payload);
            Ok(())
        })
    }

    /// Invoke the callback
    pub fn call(&self, action_type: &str, payload: &mut Payload) -> Result<()> {
        (self.0)(action_type, payload)
    }
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tracker")
    }
}

/// Contents of the `reduxTrack` slot
#[derive(Clone, Debug, Default)]
pub enum Track {
    /// No tracking requested
    #[default]
    None,
    /// A single tracking callback
    Single(Tracker),
    /// Tracking callbacks invoked in order
    Many(Vec<Tracker>),
}

impl Track {
    /// Whether the slot is empty
    pub fn is_none(&self) -> bool {
        matches!(self, Track::None)
    }

    /// The trackers to invoke, in order
    pub fn trackers(&self) -> &[Tracker] {
        match self {
            Track::None => &[],
            Track::Single(tracker) => std::slice::from_ref(tracker),
            Track::Many(trackers) => trackers,
        }
    }
}

impl From<Tracker> for Track {
    fn from(tracker: Tracker) -> Self {
        Track::Single(tracker)
    }
}

impl From<Vec<Tracker>> for Track {
    fn from(trackers: Vec<Tracker>) -> Self {
        Track::Many(trackers)
    }
}

impl From<Option<Tracker>> for Track {
    fn from(tracker: Option<Tracker>) -> Self {
        tracker.map_or(Track::None, Track::Single)
    }
}

/// Represents any action that can be dispatched through the chain
#[derive(Clone, Debug)]
pub struct Action {
    /// The type of action being performed
    action_type: String,

    /// Every other field, never containing `type`
    fields: Map<String, JsonValue>,

    /// Tracking callbacks attached to this dispatch
    track: Track,
}

impl Action {
    /// Create an action with the given type and no other fields
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            fields: Map::new(),
            track: Track::None,
        }
    }

    /// Set a field. Setting `type` replaces the action type.
    ///
    /// A non-string `type` is stored as its JSON text, so `field("type", 3)`
    /// yields the type `"3"`. Use [`Action::with`] to reject such values.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == TYPE_KEY {
            self.action_type = match value {
                JsonValue::String(s) => s,
                other => other.to_string(),
            };
        } else {
            self.fields.insert(key, value);
        }
        self
    }

    /// Set a field from any serializable value
    ///
    /// A `type` that does not serialize to a string fails with
    /// [`Error::InvalidAction`], as it does for [`Action::try_from`].
    pub fn with(mut self, key: impl Into<String>, value: impl Serialize) -> Result<Self> {
        let key = key.into();
        let value = serde_json::to_value(value)?;
        if key == TYPE_KEY {
            self.action_type = type_from_value(value)?;
        } else {
            self.fields.insert(key, value);
        }
        Ok(self)
    }

    /// Attach tracking callbacks
    pub fn track(mut self, track: impl Into<Track>) -> Self {
        self.track = track.into();
        self
    }

    /// The action type
    pub fn action_type(&self) -> &str {
        &self.action_type
    }

    /// Look up a field other than `type`
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// All fields other than `type`
    pub fn fields(&self) -> &Map<String, JsonValue> {
        &self.fields
    }

    /// The attached tracking callbacks
    pub fn tracking(&self) -> &Track {
        &self.track
    }

    /// Build a fresh payload holding every field except the reserved keys
    pub fn payload(&self) -> Payload {
        self.fields
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// JSON form of the action, `type` first. Tracking callbacks are omitted.
    pub fn to_value(&self) -> JsonValue {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert(TYPE_KEY.to_string(), JsonValue::String(self.action_type.clone()));
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        JsonValue::Object(map)
    }
}

fn type_from_value(value: JsonValue) -> Result<String> {
    match value {
        JsonValue::String(s) => Ok(s),
        other => Err(Error::InvalidAction(format!(
            "`{}` must be a string, got {}",
            TYPE_KEY, other
        ))),
    }
}

impl TryFrom<JsonValue> for Action {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        let mut fields = match value {
            JsonValue::Object(fields) => fields,
            other => {
                return Err(Error::InvalidAction(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        let action_type = match fields.remove(TYPE_KEY) {
            Some(value) => type_from_value(value)?,
            None => return Err(Error::InvalidAction(format!("missing `{}`", TYPE_KEY))),
        };

        Ok(Self {
            action_type,
            fields,
            track: Track::None,
        })
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(TYPE_KEY, &self.action_type)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = JsonValue::deserialize(deserializer)?;
        Action::try_from(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn noop() -> Tracker {
        Tracker::observe(|_, _| {})
    }

    #[test]
    fn test_payload_excludes_reserved_keys() {
        let action = Action::new("ACTION")
            .field("otherStuff", json!([1, 2, 3]))
            .field("user", "ada")
            .track(noop());

        let payload = action.payload();
        assert_eq!(
            JsonValue::Object(payload),
            json!({ "otherStuff": [1, 2, 3], "user": "ada" })
        );
    }

    #[test]
    fn test_payload_does_not_touch_action() {
        let action = Action::new("ACTION").field("count", 1).track(noop());

        let mut payload = action.payload();
        payload.insert("count".to_string(), json!(99));

        assert_eq!(action.get("count"), Some(&json!(1)));
        assert!(!action.tracking().is_none());
    }

    #[test]
    fn test_reduxtrack_data_field_is_stripped() {
        let action =
            Action::try_from(json!({ "type": "ACTION", "reduxTrack": true, "id": 7 })).unwrap();

        assert!(action.tracking().is_none());
        assert_eq!(JsonValue::Object(action.payload()), json!({ "id": 7 }));
        assert_eq!(action.get(TRACK_KEY), Some(&json!(true)));
    }

    #[test]
    fn test_track_normalizes_to_slice() {
        assert!(Track::None.trackers().is_empty());
        assert_eq!(Track::from(noop()).trackers().len(), 1);
        assert_eq!(Track::from(vec![noop(), noop(), noop()]).trackers().len(), 3);
        assert!(Track::from(None::<Tracker>).is_none());
        assert!(!Track::Many(Vec::new()).is_none());
    }

    #[test]
    fn test_setting_type_field_replaces_action_type() {
        let action = Action::new("OLD").field("type", "NEW");
        assert_eq!(action.action_type(), "NEW");
        assert!(action.get("type").is_none());
    }

    #[test]
    fn test_non_string_type_handling() {
        let coerced = Action::new("OLD").field("type", 3);
        assert_eq!(coerced.action_type(), "3");

        assert!(matches!(
            Action::new("OLD").with("type", 3),
            Err(Error::InvalidAction(_))
        ));
        let replaced = Action::new("OLD").with("type", "NEW").unwrap();
        assert_eq!(replaced.action_type(), "NEW");
        assert!(replaced.get("type").is_none());
    }

    #[test]
    fn test_with_serializes_value() {
        #[derive(Serialize)]
        struct Item {
            sku: &'static str,
            qty: u32,
        }

        let action = Action::new("cart.add")
            .with("item", Item { sku: "A-1", qty: 2 })
            .unwrap();
        assert_eq!(action.get("item"), Some(&json!({ "sku": "A-1", "qty": 2 })));
    }

    #[test]
    fn test_try_from_rejects_bad_shapes() {
        assert!(matches!(
            Action::try_from(json!([1, 2])),
            Err(Error::InvalidAction(_))
        ));
        assert!(matches!(
            Action::try_from(json!({ "payload": 1 })),
            Err(Error::InvalidAction(_))
        ));
        assert!(matches!(
            Action::try_from(json!({ "type": 3 })),
            Err(Error::InvalidAction(_))
        ));
    }

    #[test]
    fn test_serde_skips_trackers() {
        let action = Action::new("ACTION").field("a", 1).track(noop());

        let encoded = serde_json::to_value(&action).unwrap();
        assert_eq!(encoded, json!({ "type": "ACTION", "a": 1 }));
        assert_eq!(encoded, action.to_value());

        let decoded: Action = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded.action_type(), "ACTION");
        assert!(decoded.tracking().is_none());
    }

    #[test]
    fn test_tracker_call_passes_arguments() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let tracker = Tracker::new(move |action_type, payload| {
            assert_eq!(action_type, "ACTION");
            payload.insert("seen".to_string(), json!(true));
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let mut payload = Payload::new();
        tracker.call("ACTION", &mut payload).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(payload.get("seen"), Some(&json!(true)));
    }
}
