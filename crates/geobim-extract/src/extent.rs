//! Global extent accumulation.

use glam::DVec3;

/// Axis-aligned bounds of an entire loaded model.
///
/// An empty model produces `min > max` on every axis; check
/// [`Extent::is_defined`] before using the extent for camera framing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: DVec3,
    pub max: DVec3,
    /// Midpoint of `min` and `max` per axis.
    pub center: DVec3,
    /// `max - min` per axis, component-wise non-negative when defined.
    pub size: DVec3,
}

impl Extent {
    /// Whether any vertex was observed. False means the extent is undefined,
    /// not a degenerate box.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}

/// Running min/max fold over every vertex position of a load.
///
/// Positions are consumed exactly once in a single forward pass; the fold is
/// commutative, so consumption order does not affect the result. This is a
/// side channel: the extent informs camera framing and never feeds back into
/// geometry construction.
#[derive(Debug, Clone, Copy)]
pub struct ExtentAccumulator {
    min: DVec3,
    max: DVec3,
}

impl Default for ExtentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtentAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: DVec3::INFINITY,
            max: DVec3::NEG_INFINITY,
        }
    }

    /// Fold one position into the running bounds.
    pub fn observe(&mut self, position: [f64; 3]) {
        let p = DVec3::from_array(position);
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Fold a flat position buffer (3 doubles per vertex).
    pub fn observe_all(&mut self, positions: &[f64]) {
        for p in positions.chunks_exact(3) {
            self.observe([p[0], p[1], p[2]]);
        }
    }

    /// Finish the fold and expose the accumulated extent.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent {
            min: self.min,
            max: self.max,
            center: (self.min + self.max) / 2.0,
            size: self.max - self.min,
        }
    }
}
