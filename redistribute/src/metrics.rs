use model::TrackPoint;

/// Distances along the guide points, from the first anchor through the last.
pub struct SegmentMetrics {
    /// distances[i] is from guide point i to i + 1, in radians
    pub distances: Vec<f64>,
    /// acc_distances[i] is the sum of distances[0..=i]
    pub acc_distances: Vec<f64>,
}

impl SegmentMetrics {
    /// `guide` includes both anchors, so it needs at least 2 points.
    pub fn new(guide: &[TrackPoint]) -> Self {
        let distances: Vec<f64> = guide
            .windows(2)
            .map(|pair| pair[0].radians_between(&pair[1]))
            .collect();

        let mut acc_distances = Vec::with_capacity(distances.len());
        let mut sum = 0.0;
        for dist in &distances {
            sum += dist;
            acc_distances.push(sum);
        }

        Self {
            distances,
            acc_distances,
        }
    }

    /// How many interior guide points lie between the two anchors
    pub fn guide_size(&self) -> usize {
        self.distances.len().saturating_sub(1)
    }

    pub fn total(&self) -> f64 {
        self.acc_distances.last().cloned().unwrap_or(0.0)
    }

    /// For interior guide point `step + 1`, the distance arriving from the previous guide
    /// point, and the remaining distance from it to the final anchor.
    pub fn step(&self, step: usize) -> (f64, f64) {
        (
            self.distances[step],
            self.total() - self.acc_distances[step],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates() {
        let guide = vec![
            TrackPoint::new(0.0, 0.0, None),
            TrackPoint::new(1.0, 0.0, None),
            TrackPoint::new(3.0, 0.0, None),
            TrackPoint::new(6.0, 0.0, None),
        ];
        let metrics = SegmentMetrics::new(&guide);
        assert_eq!(metrics.guide_size(), 2);
        assert_eq!(metrics.distances.len(), 3);

        let deg = 1.0_f64.to_radians();
        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
        assert!(close(metrics.distances[1], 2.0 * deg));
        assert!(close(metrics.acc_distances[2], 6.0 * deg));
        assert!(close(metrics.total(), 6.0 * deg));

        let (left, right) = metrics.step(0);
        assert!(close(left, deg));
        assert!(close(right, 5.0 * deg));
        let (left, right) = metrics.step(1);
        assert!(close(left, 2.0 * deg));
        assert!(close(right, 3.0 * deg));
    }

    #[test]
    fn adjacent_anchors() {
        let guide = vec![
            TrackPoint::new(0.0, 0.0, None),
            TrackPoint::new(0.0, 1.0, None),
        ];
        let metrics = SegmentMetrics::new(&guide);
        assert_eq!(metrics.guide_size(), 0);
        assert_eq!(metrics.acc_distances.len(), 1);
    }
}
