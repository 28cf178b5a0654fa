//! Leveled logger handle passed through to providers.
//!
//! A thin wrapper over a [`tracing::Span`] rather than a bespoke trait — the
//! Engine and its default providers already depend on `tracing` directly, so
//! the handle just enters the span and emits at the requested level.

use tracing::Span;

/// A leveled logger handle, cheap to clone, passed by value into providers.
#[derive(Clone)]
pub struct Logger {
    span: Span,
}

impl Logger {
    /// Build a logger rooted at the given span name.
    pub fn new(span_name: &'static str) -> Self {
        Self {
            span: tracing::info_span!("engine", name = span_name),
        }
    }

    /// Build a child logger scoped to one resource, for providers to log under.
    pub fn child(&self, resource: &str) -> Self {
        let _enter = self.span.enter();
        Self {
            span: tracing::info_span!("resource", name = %resource),
        }
    }

    /// Emit an info-level line.
    pub fn info(&self, message: &str) {
        let _enter = self.span.enter();
        tracing::info!("{message}");
    }

    /// Emit a warn-level line.
    pub fn warn(&self, message: &str) {
        let _enter = self.span.enter();
        tracing::warn!("{message}");
    }

    /// Emit an error-level line.
    pub fn error(&self, message: &str) {
        let _enter = self.span.enter();
        tracing::error!("{message}");
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new("engine")
    }
}
