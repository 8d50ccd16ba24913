//! Resizable split between the description pane and the editor pane.
//!
//! A drag is a scoped capture: `pointer_down` snapshots the container
//! geometry, `pointer_move` converts pointer x to a clamped percentage,
//! `pointer_up` releases the capture.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::layout_sync::{LayoutCause, LayoutSyncSignal};
use crate::error::WorkspaceError;

pub const MIN_FRACTION: f64 = 25.0;
pub const MAX_FRACTION: f64 = 75.0;
pub const DEFAULT_FRACTION: f64 = 50.0;

/// Container bounding box, horizontal part only.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub width: f64,
}

impl Geometry {
    /// Pointer x → clamped percentage of the container width.
    pub fn fraction_at(&self, x: f64) -> Result<f64, WorkspaceError> {
        if !(self.width.is_finite() && self.width > 0.0) || !self.left.is_finite() || !x.is_finite() {
            return Err(WorkspaceError::DegenerateGeometry { width: self.width });
        }
        let pct = (x - self.left) / self.width * 100.0;
        Ok(pct.clamp(MIN_FRACTION, MAX_FRACTION))
    }
}

#[derive(Debug)]
pub struct SplitLayoutController {
    fraction: f64,
    capture: Option<Geometry>,
}

impl Default for SplitLayoutController {
    fn default() -> Self {
        Self { fraction: DEFAULT_FRACTION, capture: None }
    }
}

impl SplitLayoutController {
    /// Description pane share, always within [25, 75].
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    /// Start a gesture. A capture left over from a gesture that never saw
    /// its pointer-up is released first.
    pub fn pointer_down(&mut self, geometry: Geometry) {
        if self.capture.replace(geometry).is_some() {
            warn!(target: "workspace", "Previous drag never ended; released its capture");
        }
        debug!(target: "workspace", left = geometry.left, width = geometry.width, "Drag started");
    }

    /// Apply a pointer move. Ignored outside a gesture. Returns the new
    /// fraction when it changed (and the layout signal fired).
    pub fn pointer_move(&mut self, x: f64, signal: &LayoutSyncSignal) -> Option<f64> {
        let geometry = self.capture?;
        match geometry.fraction_at(x) {
            Ok(next) if next != self.fraction => {
                self.fraction = next;
                signal.fire(LayoutCause::SplitChanged);
                Some(next)
            }
            Ok(_) => None,
            Err(e) => {
                debug!(target: "workspace", error = %e, fraction = self.fraction, "Ignoring drag move");
                None
            }
        }
    }

    /// End the gesture. Safe to call when no gesture is active.
    pub fn pointer_up(&mut self) {
        if self.capture.take().is_some() {
            debug!(target: "workspace", fraction = self.fraction, "Drag ended");
        }
    }
}
