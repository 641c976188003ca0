//! Georeferencing of assembled batches.

use glam::{DMat4, DVec3, DVec4};

use crate::PrimitiveBatch;

/// WGS84 semi-major axis in meters.
const WGS84_SEMI_MAJOR: f64 = 6_378_137.0;
/// WGS84 flattening.
const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

/// Geographic anchor for a whole model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeographicAnchor {
    /// Longitude in degrees, `[-180, 180]`.
    pub longitude_deg: f64,
    /// Latitude in degrees, `[-90, 90]`.
    pub latitude_deg: f64,
    /// Height above the ellipsoid in meters, may be negative.
    pub height_m: f64,
}

impl GeographicAnchor {
    #[must_use]
    pub fn new(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Self {
        Self {
            longitude_deg,
            latitude_deg,
            height_m,
        }
    }

    /// Geodetic-to-ECEF conversion on the WGS84 ellipsoid.
    #[must_use]
    pub fn to_ecef(&self) -> DVec3 {
        let lon = self.longitude_deg.to_radians();
        let lat = self.latitude_deg.to_radians();
        let e_sq = WGS84_FLATTENING * (2.0 - WGS84_FLATTENING);
        // Prime vertical radius of curvature.
        let n = WGS84_SEMI_MAJOR / (1.0 - e_sq * lat.sin() * lat.sin()).sqrt();
        DVec3::new(
            (n + self.height_m) * lat.cos() * lon.cos(),
            (n + self.height_m) * lat.cos() * lon.sin(),
            (n * (1.0 - e_sq) + self.height_m) * lat.sin(),
        )
    }
}

/// East-north-up frame at a geographic anchor, as an earth-fixed transform.
///
/// Columns are the east, north, and up unit vectors at the anchor, with the
/// anchor's ECEF position as the translation.
#[must_use]
pub fn east_north_up_to_fixed_frame(anchor: &GeographicAnchor) -> DMat4 {
    let lon = anchor.longitude_deg.to_radians();
    let lat = anchor.latitude_deg.to_radians();

    let east = DVec3::new(-lon.sin(), lon.cos(), 0.0);
    let up = DVec3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
    let north = up.cross(east);
    let origin = anchor.to_ecef();

    DMat4::from_cols(
        east.extend(0.0),
        north.extend(0.0),
        up.extend(0.0),
        DVec4::new(origin.x, origin.y, origin.z, 1.0),
    )
}

/// Place every assembled batch at the anchor.
///
/// The frame is a rigid placement of the whole model applied once after
/// assembly; it leaves the per-instance model matrices untouched.
pub fn georeference_batches(batches: &mut [PrimitiveBatch], anchor: &GeographicAnchor) {
    let frame = east_north_up_to_fixed_frame(anchor);
    for batch in batches {
        batch.world_transform = frame;
    }
}
