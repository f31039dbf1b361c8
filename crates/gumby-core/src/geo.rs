//! Geographic points.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A WGS84 (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub lat: f64,
  pub lon: f64,
}

impl GeoPoint {
  /// Build a point, rejecting coordinates outside the valid ranges.
  pub fn new(lat: f64, lon: f64) -> Result<Self> {
    let point = Self { lat, lon };
    point.check()?;
    Ok(point)
  }

  /// Latitude within [-90, 90] and longitude within [-180, 180]; NaN fails.
  pub fn check(&self) -> Result<()> {
    if (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    {
      Ok(())
    } else {
      Err(Error::PointOutOfRange {
        lat: self.lat,
        lon: self.lon,
      })
    }
  }
}
