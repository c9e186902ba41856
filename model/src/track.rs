use geom::{Distance, Duration};
use serde::{Deserialize, Serialize};

use crate::TrackPoint;

/// An ordered sequence of points. Editing operations snapshot the contents, build a new
/// sequence off to the side, then swap it in with one `replace_contents`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    points: Vec<TrackPoint>,
}

impl Track {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn get(&self, idx: usize) -> Option<&TrackPoint> {
        self.points.get(idx)
    }

    /// A deep copy of every point
    pub fn clone_contents(&self) -> Vec<TrackPoint> {
        self.points.clone()
    }

    pub fn replace_contents(&mut self, points: Vec<TrackPoint>) {
        self.points = points;
    }

    /// Ground distance along every point, for reporting
    pub fn length(&self) -> Distance {
        let mut total = Distance::ZERO;
        for pair in self.points.windows(2) {
            total += pair[0].to_lonlat().gps_dist(pair[1].to_lonlat());
        }
        total
    }

    /// Time between the first and last timestamped points
    pub fn span(&self) -> Option<Duration> {
        let first = self.points.iter().find(|pt| pt.time.is_some())?;
        let last = self.points.iter().rev().find(|pt| pt.time.is_some())?;
        Some(Duration::seconds(last.seconds_since(first)?))
    }
}

/// An inclusive range of indices into a track, or nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    range: Option<(usize, usize)>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<usize> {
        self.range.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<usize> {
        self.range.map(|(_, end)| end)
    }

    pub fn range(&self) -> Option<(usize, usize)> {
        self.range
    }

    pub fn select_range(&mut self, start: usize, end: usize) {
        self.range = Some((start, end));
    }

    pub fn clear_all(&mut self) {
        self.range = None;
    }

    /// True if both ends exist in a track of this many points.
    pub fn fits(&self, num_points: usize) -> bool {
        match self.range {
            Some((start, end)) => start <= end && end < num_points,
            None => false,
        }
    }
}
