//! Tracking middleware
//!
//! Invokes the callbacks attached to an action's `reduxTrack` slot with the
//! action type and a payload stripped of `type` and `reduxTrack`, then
//! forwards the original action to the next link.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::middleware::{next_fn, Middleware, Next};
use crate::{Action, Result};

/// Configuration for the tracking middleware
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrackingConfig {
    /// Whether attached trackers are invoked at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to emit a trace line for every tracked dispatch
    #[serde(default = "default_false")]
    pub log_invocations: bool,
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            log_invocations: default_false(),
        }
    }
}

/// Middleware that runs the tracking callbacks carried by actions
#[derive(Clone, Debug, Default)]
pub struct TrackingMiddleware {
    /// Configuration for the tracking middleware
    config: TrackingConfig,
}

impl TrackingMiddleware {
    /// Create a new tracking middleware with the specified configuration
    pub fn new(config: TrackingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &TrackingConfig {
        &self.config
    }

    /// Process one action, forwarding it to `next`
    ///
    /// Tracker errors are returned as-is and stop the dispatch: later
    /// trackers and `next` are not called.
    pub fn handle<R>(&self, action: Action, next: &Next<R>) -> Result<R> {
        if !self.config.enabled || action.tracking().is_none() {
            return next(action);
        }

        let trackers = action.tracking().trackers();
        let mut payload = action.payload();

        if self.config.log_invocations {
            trace!(
                "Tracking action {} with {} tracker(s)",
                action.action_type(),
                trackers.len()
            );
        }

        for tracker in trackers {
            tracker.call(action.action_type(), &mut payload)?;
        }

        next(action)
    }
}

impl<C, R: 'static> Middleware<C, R> for TrackingMiddleware {
    fn wrap(&self, _ctx: &C, next: Next<R>) -> Next<R> {
        let middleware = self.clone();
        next_fn(move |action| middleware.handle(action, &next))
    }
}
