//! Scaling controller
//!
//! Fits the rendered artifact to its viewport. A single artifact gets a
//! uniform fit-scale computed from its natural size; multiple artifacts
//! (front/back of a card) get no per-artifact transform at all - their
//! layout is delegated to static responsive styling. Placeholders are
//! never scaled.

use serde::{Deserialize, Serialize};

use crate::preview::PreviewDoc;

/// Margin subtracted from the raw fit ratio
pub const FIT_MARGIN: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// Uniform fit-scale for one artifact of the given natural size.
///
/// Floored so a non-positive computed scale falls back to 1.0.
pub fn fit_scale(viewport: Viewport, natural_width: f64, natural_height: f64) -> f64 {
    let scale =
        (viewport.width / natural_width).min(viewport.height / natural_height) - FIT_MARGIN;
    if scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Apply the scaling policy to the current preview
pub fn rescale(preview: &mut PreviewDoc, viewport: Viewport) {
    if preview.is_placeholder() || preview.artifacts.is_empty() {
        return;
    }

    if preview.artifacts.len() == 1 {
        let artifact = &mut preview.artifacts[0];
        if artifact.natural_width <= 0.0
            || artifact.natural_height <= 0.0
            || viewport.width <= 0.0
            || viewport.height <= 0.0
        {
            return;
        }
        artifact.transform = Some(fit_scale(
            viewport,
            artifact.natural_width,
            artifact.natural_height,
        ));
    } else {
        preview.clear_transforms();
    }
}
