//! # Chart Rendering Abstraction
//!
//! The actual drawing is done by an external charting library; this module
//! only defines the seam and the lifecycle rule around it.
//!
//! ## The lifecycle rule
//! Re-rendering a report must never leak or duplicate chart instances: the
//! previous chart of a target is destroyed before (well, when) the new one
//! is installed. The production dashboards used to track "the current
//! chart" in a process-wide mutable; here the live handle is an owned
//! resource inside a [`ChartSlot`], destroyed on replacement and on drop.

use thiserror::Error;
use toywalls_core::ChartConfig;

/// Rendering errors.
///
/// `TargetMissing` is expected in normal operation (a dashboard page
/// without that widget) and callers treat it as a no-op, not a failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The named render target does not exist.
    #[error("render target not found: {target}")]
    TargetMissing { target: String },

    /// The charting backend rejected the configuration.
    #[error("chart backend failed: {0}")]
    Backend(String),
}

/// A live chart instance. Destroying it releases whatever the backend
/// holds for it (canvas bindings, event listeners, ...).
///
/// `destroy` must be idempotent: the slot calls it exactly once, but a
/// backend handle may also be destroyed manually first.
pub trait ChartHandle {
    fn destroy(&mut self);
}

/// The external charting library seam: a declarative configuration goes
/// in, a destroyable handle comes out.
pub trait ChartBackend {
    type Handle: ChartHandle;

    /// Mounts a chart onto the named target.
    fn draw(&self, target: &str, config: &ChartConfig) -> Result<Self::Handle, RenderError>;
}

/// Owner of the single live chart of one render target.
///
/// Invariant: at most one handle is alive per slot, and whatever leaves
/// the slot (replacement, clear, drop) gets destroyed.
#[derive(Debug, Default)]
pub struct ChartSlot<H: ChartHandle> {
    current: Option<H>,
}

impl<H: ChartHandle> ChartSlot<H> {
    /// An empty slot.
    pub fn new() -> Self {
        ChartSlot { current: None }
    }

    /// True when a chart is currently mounted.
    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }

    /// Installs a new chart, destroying the previous one first.
    pub fn replace(&mut self, handle: H) {
        self.clear();
        self.current = Some(handle);
    }

    /// Destroys the current chart, if any. Idempotent.
    pub fn clear(&mut self) {
        if let Some(mut old) = self.current.take() {
            old.destroy();
        }
    }
}

/// Guaranteed release: a slot going out of scope destroys its chart.
impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
