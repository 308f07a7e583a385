// Copyright 2025 the Topoview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Per-frame smoothing factors used by [`crate::advance_animation`].
///
/// Each animated scalar is first moved toward its target by a fixed *bias*
/// step (snapping once the gap is smaller than the step), then blended toward
/// the target by a *lerp* factor. The bias step guarantees the animation
/// reaches its target in a bounded number of frames; the lerp keeps motion
/// continuous.
///
/// Focus smoothing uses a larger lerp than zoom so that pans feel snappier
/// than zooms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Smoothing {
    /// Fixed step applied to the zoom factor before blending.
    pub zoom_bias: f64,
    /// Blend factor applied to the zoom factor.
    pub zoom_lerp: f64,
    /// Fixed step, in canvas units, applied to each focus axis.
    pub focus_bias: f64,
    /// Blend factor applied to each focus axis.
    pub focus_lerp: f64,
    /// Distance under which a scalar counts as settled.
    pub epsilon: f64,
}

impl Smoothing {
    /// The default smoothing: `0.05`/`0.2` for zoom, `0.1`/`0.35` for focus,
    /// settling below `1e-7`.
    pub const DEFAULT: Self = Self {
        zoom_bias: 0.05,
        zoom_lerp: 0.2,
        focus_bias: 0.1,
        focus_lerp: 0.35,
        epsilon: 1e-7,
    };

    /// Smoothing that jumps straight to the target every frame.
    pub const IMMEDIATE: Self = Self {
        zoom_bias: 0.0,
        zoom_lerp: 1.0,
        focus_bias: 0.0,
        focus_lerp: 1.0,
        epsilon: 1e-7,
    };

    /// Returns a copy with the given zoom factors.
    #[must_use]
    pub fn with_zoom(mut self, bias: f64, lerp: f64) -> Self {
        self.zoom_bias = bias;
        self.zoom_lerp = lerp;
        self
    }

    /// Returns a copy with the given focus factors.
    #[must_use]
    pub fn with_focus(mut self, bias: f64, lerp: f64) -> Self {
        self.focus_bias = bias;
        self.focus_lerp = lerp;
        self
    }
}

impl Default for Smoothing {
    fn default() -> Self {
        Self::DEFAULT
    }
}
