use chrono::NaiveDateTime;
use geom::LonLat;
use serde::{Deserialize, Serialize};

/// A single recorded position. Values are never mutated in place; editing operations build
/// new points instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Meters
    pub altitude: Option<f64>,
    pub time: Option<NaiveDateTime>,
}

/// Just the geometry of a point, without a timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl TrackPoint {
    pub fn new(latitude: f64, longitude: f64, time: Option<NaiveDateTime>) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            time,
        }
    }

    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
        }
    }

    /// Keeps this point's time, but takes latitude, longitude, and altitude from `loc`.
    pub fn with_location(&self, loc: Location) -> Self {
        Self {
            latitude: loc.latitude,
            longitude: loc.longitude,
            altitude: loc.altitude,
            time: self.time,
        }
    }

    pub fn with_location_of(&self, other: &TrackPoint) -> Self {
        self.with_location(other.location())
    }

    pub fn to_lonlat(&self) -> LonLat {
        LonLat::new(self.longitude, self.latitude)
    }

    /// Great-circle angle between two points, in radians.
    pub fn radians_between(&self, other: &TrackPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push this slightly past 1 for antipodal points
        2.0 * a.sqrt().min(1.0).asin()
    }

    /// Seconds elapsed from `earlier` until this point. None if either lacks a time.
    pub fn seconds_since(&self, earlier: &TrackPoint) -> Option<f64> {
        let t1 = earlier.time?;
        let t2 = self.time?;
        Some((t2 - t1).num_milliseconds() as f64 / 1000.0)
    }

    /// Produces `count` locations evenly spaced strictly between this point and `to`. Both
    /// endpoints are excluded.
    pub fn interpolate(&self, to: &TrackPoint, count: usize) -> Vec<Location> {
        let mut results = Vec::with_capacity(count);
        for i in 0..count {
            let pct = (i + 1) as f64 / (count + 1) as f64;
            results.push(Location {
                latitude: lerp(self.latitude, to.latitude, pct),
                longitude: lerp(self.longitude, to.longitude, pct),
                altitude: match (self.altitude, to.altitude) {
                    (Some(a1), Some(a2)) => Some(lerp(a1, a2, pct)),
                    _ => None,
                },
            });
        }
        results
    }
}

fn lerp(from: f64, to: f64, pct: f64) -> f64 {
    from + pct * (to - from)
}
