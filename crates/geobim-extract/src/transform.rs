//! Model matrix composition.

use std::f64::consts::FRAC_PI_2;

use glam::{DMat4, DQuat, DVec3};

/// Fixed rotation realigning the source model's up axis to the scene's.
///
/// Building models are authored Z-up; the scene is Y-up. The realignment is a
/// 90 degree rotation about +X with zero translation and unit scale.
#[must_use]
pub fn axis_realignment() -> DMat4 {
    DMat4::from_quat(DQuat::from_axis_angle(DVec3::X, FRAC_PI_2))
}

/// Compose the model matrix for a placed geometry.
///
/// The local placement applies first, then the axis realignment: a point is
/// placed within the model before the whole model is re-oriented.
#[must_use]
pub fn compose_model_matrix(local_placement: &DMat4) -> DMat4 {
    axis_realignment() * *local_placement
}
