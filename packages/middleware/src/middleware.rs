//! Middleware protocol and chain composition
//!
//! A middleware receives the store context and the next link of the chain,
//! and returns the handler that takes its place. Composition follows the
//! `applyMiddleware` convention: the first middleware added sees an action first.

use std::fmt;
use std::sync::Arc;

use crate::{Action, Result};

/// A link of the dispatch chain
pub type Next<R> = Arc<dyn Fn(Action) -> Result<R> + Send + Sync>;

/// Turn a closure into a dispatch link
pub fn next_fn<R, F>(f: F) -> Next<R>
where
    F: Fn(Action) -> Result<R> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Core middleware trait that all middlewares must implement
///
/// `C` is the store context a middleware may read, `R` is what a dispatch
/// returns. `wrap` is called once per chain position; the returned handler
/// is then called once per action.
pub trait Middleware<C, R>: Send + Sync {
    /// Build the handler for this position of the chain
    fn wrap(&self, ctx: &C, next: Next<R>) -> Next<R>;
}

/// Ordered list of middlewares wrapping a base dispatch function
pub struct MiddlewareChain<C, R> {
    /// List of middlewares to apply in order
    middlewares: Vec<Arc<dyn Middleware<C, R>>>,
}

impl<C, R> MiddlewareChain<C, R> {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the end of the chain
    pub fn add(&mut self, middleware: Arc<dyn Middleware<C, R>>) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Number of middlewares in the chain
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    /// Whether the chain has no middlewares
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Wrap `base` with every middleware and return the resulting dispatch
    pub fn apply(&self, ctx: &C, base: Next<R>) -> Next<R> {
        self.middlewares
            .iter()
            .rev()
            .fold(base, |next, middleware| middleware.wrap(ctx, next))
    }
}

impl<C, R> Default for MiddlewareChain<C, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> fmt::Debug for MiddlewareChain<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}
