//! Redux Track
//!
//! A middleware for Redux-style dispatch chains that runs the tracking
//! callbacks attached to an action before passing the action on unchanged.
//!
//! ```
//! use redux_track::{init_tracking, next_fn, Action, MiddlewareChain, Tracker, TrackingConfig};
//! use std::sync::Arc;
//!
//! # fn main() -> redux_track::Result<()> {
//! let mut chain: MiddlewareChain<(), Action> = MiddlewareChain::new();
//! chain.add(Arc::new(init_tracking(TrackingConfig::default())));
//! let dispatch = chain.apply(&(), next_fn(Ok));
//!
//! let action = Action::new("ACTION")
//!     .field("otherStuff", vec![1, 2, 3])
//!     .track(Tracker::observe(|action_type, payload| {
//!         println!("{} {:?}", action_type, payload);
//!     }));
//! let forwarded = dispatch(action)?;
//! assert_eq!(forwarded.action_type(), "ACTION");
//! # Ok(())
//! # }
//! ```

mod action;
mod error;
mod event;
mod middleware;
pub mod serialization;
mod track;
pub mod trackers;

pub use action::{Action, Payload, Track, Tracker, RESERVED_KEYS, TRACK_KEY, TYPE_KEY};
pub use error::{BoxError, Error, Result};
pub use event::TrackedEvent;
pub use middleware::{next_fn, Middleware, MiddlewareChain, Next};
pub use serialization::Format;
pub use track::{TrackingConfig, TrackingMiddleware};

/// Create the tracking middleware with the specified configuration
pub fn init_tracking(config: TrackingConfig) -> TrackingMiddleware {
    TrackingMiddleware::new(config)
}
