use serde::{Deserialize, Serialize};

/// The tolerance used by `MatchPolicy::CloseEnough` unless configured otherwise.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// How to pick a buffer point for each guide step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchPolicy {
    /// Bisect all the way down to a single index.
    Bisect,
    /// Bisect, but stop as soon as the midpoint's velocities agree within this fraction.
    CloseEnough { tolerance: f64 },
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Bisect
    }
}

/// What one guide step needs covered. Times are seconds relative to any common origin.
#[derive(Clone, Copy, Debug)]
pub struct Pacing {
    /// From the previous anchor to this step's guide point
    pub left_dist: f64,
    /// From this step's guide point to the final anchor
    pub right_dist: f64,
    pub start_time: f64,
    pub end_time: f64,
}

impl Pacing {
    /// Velocity needed to arrive at a point at this time, and to leave it for the end.
    /// Equal timestamps divide by zero; the results are infinite or NaN.
    pub fn velocities(&self, time: f64) -> (f64, f64) {
        let left = self.left_dist / (time - self.start_time);
        let right = self.right_dist / (self.end_time - time);
        (left, right)
    }
}

/// Finds the index in `[lo, hi]` whose time best balances the velocity before and after it.
/// `times` must be sorted and `lo <= hi`.
///
/// A slower approach than departure means the optimum is at or before the midpoint. Any NaN
/// comparison is false, so degenerate timing always moves the search right.
pub fn find_best_match(
    times: &[f64],
    pacing: &Pacing,
    mut lo: usize,
    mut hi: usize,
    policy: MatchPolicy,
) -> usize {
    assert!(lo <= hi && hi < times.len(), "bad window [{lo}, {hi}]");

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let (left_v, right_v) = pacing.velocities(times[mid]);

        if let MatchPolicy::CloseEnough { tolerance } = policy {
            if (left_v / right_v - 1.0).abs() < tolerance {
                return mid;
            }
        }

        if left_v < right_v {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
