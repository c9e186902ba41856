use anyhow::Result;

use model::TrackPoint;

use crate::interpolate::fill;
use crate::metrics::SegmentMetrics;
use crate::search::{find_best_match, MatchPolicy, Pacing};

/// The buffer points, placed along the guide.
pub struct Merged {
    /// One per buffer point, in buffer order
    pub points: Vec<TrackPoint>,
    /// For each interior guide point, the index of the buffer point that took its place.
    /// Strictly increasing.
    pub anchors: Vec<usize>,
}

/// Lays `buffer` along `guide`, which starts and ends with the two anchors that stay fixed.
/// Every interior guide point is matched to one buffer point, in order. That point keeps its
/// time but moves to the guide point's location. The remaining buffer points are spread evenly
/// between the matched ones.
pub fn merge(guide: &[TrackPoint], buffer: &[TrackPoint], policy: MatchPolicy) -> Result<Merged> {
    if guide.len() < 2 {
        bail!("The guide needs two anchors, but has {} points", guide.len());
    }
    let first = &guide[0];
    let last = &guide[guide.len() - 1];
    let metrics = SegmentMetrics::new(guide);
    let guide_size = metrics.guide_size();

    let mut points = Vec::with_capacity(buffer.len());
    let mut anchors = Vec::with_capacity(guide_size);
    let mut prev = first.clone();
    let mut next_unused = 0;

    if guide_size > 0 {
        if guide_size > buffer.len() {
            bail!(
                "{} guide points need matching, but only {} points are memorized",
                guide_size,
                buffer.len()
            );
        }
        let (times, end_time) = relative_times(first, last, buffer)?;
        let mut prev_time = 0.0;

        for step in 0..guide_size {
            let (left_dist, right_dist) = metrics.step(step);
            let pacing = Pacing {
                left_dist,
                right_dist,
                start_time: prev_time,
                end_time,
            };
            // Search everything left, but leave at least one buffer point for every later
            // step
            let g = find_best_match(&times, &pacing, next_unused, buffer.len() - 1, policy)
                .min(buffer.len() - (guide_size - step));

            let anchor = buffer[g].with_location_of(&guide[step + 1]);
            fill(&mut points, &prev, &anchor, &buffer[next_unused..g]);
            points.push(anchor.clone());
            anchors.push(g);

            prev = anchor;
            prev_time = times[g];
            next_unused = g + 1;
        }
    }

    fill(&mut points, &prev, last, &buffer[next_unused..]);
    debug_assert_eq!(points.len(), buffer.len());

    Ok(Merged { points, anchors })
}

// Seconds of every buffer point and the final anchor, relative to the first anchor
fn relative_times(
    first: &TrackPoint,
    last: &TrackPoint,
    buffer: &[TrackPoint],
) -> Result<(Vec<f64>, f64)> {
    if first.time.is_none() || last.time.is_none() {
        bail!("Both ends of the selection need times to redistribute points");
    }
    let end_time = last.seconds_since(first).unwrap_or(0.0);

    let mut times = Vec::with_capacity(buffer.len());
    for (idx, pt) in buffer.iter().enumerate() {
        match pt.seconds_since(first) {
            Some(secs) => times.push(secs),
            None => bail!("Memorized point {} has no time", idx),
        }
    }
    for pair in times.windows(2) {
        if pair[0] > pair[1] {
            bail!("Memorized points are out-of-order: {}s then {}s", pair[0], pair[1]);
        }
    }
    Ok((times, end_time))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn at(secs: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2022, 5, 1).and_then(|d| d.and_hms_opt(8, 0, secs))
    }

    #[test]
    fn no_interior_points() {
        let guide = vec![
            TrackPoint::new(0.0, 0.0, at(0)),
            TrackPoint::new(0.0, 3.0, at(30)),
        ];
        // Times aren't needed when nothing is searched for
        let buffer = vec![
            TrackPoint::new(5.0, 5.0, None),
            TrackPoint::new(6.0, 6.0, None),
        ];
        let merged = merge(&guide, &buffer, MatchPolicy::Bisect).unwrap();
        assert!(merged.anchors.is_empty());
        assert_eq!(merged.points.len(), 2);
        assert!((merged.points[0].longitude - 1.0).abs() < 1e-12);
        assert!((merged.points[1].longitude - 2.0).abs() < 1e-12);
        assert_eq!(merged.points[1].time, None);
    }

    #[test]
    fn every_buffer_point_anchors() {
        let guide: Vec<TrackPoint> = (0..4)
            .map(|i| TrackPoint::new(0.0, i as f64, at(10 * i)))
            .collect();
        let buffer = vec![
            TrackPoint::new(1.0, 1.0, at(12)),
            TrackPoint::new(1.0, 1.0, at(17)),
        ];
        let merged = merge(&guide, &buffer, MatchPolicy::Bisect).unwrap();
        assert_eq!(merged.anchors, vec![0, 1]);
        assert_eq!(merged.points[0].longitude, 1.0);
        assert_eq!(merged.points[0].time, at(12));
        assert_eq!(merged.points[1].longitude, 2.0);
        assert_eq!(merged.points[1].time, at(17));
    }

    #[test]
    fn close_enough_searches_the_whole_window() {
        // The first step's first midpoint is within 1%, so it's taken even though a narrower
        // window would have looked elsewhere.
        let guide = vec![
            TrackPoint::new(0.0, 0.0, at(0)),
            TrackPoint::new(0.0, 1.0, at(10)),
            TrackPoint::new(0.0, 1.5, at(20)),
            TrackPoint::new(0.0, 2.0, at(40)),
        ];
        let base = at(0).unwrap();
        let buffer: Vec<TrackPoint> = [5_000, 19_950, 20_100, 30_000, 35_000]
            .iter()
            .map(|ms| {
                TrackPoint::new(1.0, 1.0, Some(base + chrono::Duration::milliseconds(*ms)))
            })
            .collect();
        let policy = MatchPolicy::CloseEnough { tolerance: 0.01 };
        let merged = merge(&guide, &buffer, policy).unwrap();
        assert_eq!(merged.anchors, vec![2, 4]);
    }

    #[test]
    fn late_matches_leave_room_for_later_steps() {
        // The first step would pick the last memorized point, so it gets pushed back to leave
        // one for the second step
        let guide: Vec<TrackPoint> = (0..4)
            .map(|i| TrackPoint::new(0.0, i as f64, at(10 * i)))
            .collect();
        let buffer = vec![
            TrackPoint::new(1.0, 1.0, at(1)),
            TrackPoint::new(1.0, 1.0, at(2)),
            TrackPoint::new(1.0, 1.0, at(3)),
        ];
        let merged = merge(&guide, &buffer, MatchPolicy::Bisect).unwrap();
        assert_eq!(merged.anchors, vec![1, 2]);
        assert_eq!(merged.points.len(), 3);
    }

    #[test]
    fn not_enough_memorized() {
        let guide: Vec<TrackPoint> = (0..4)
            .map(|i| TrackPoint::new(0.0, i as f64, at(10 * i)))
            .collect();
        let buffer = vec![TrackPoint::new(1.0, 1.0, at(12))];
        assert!(merge(&guide, &buffer, MatchPolicy::Bisect).is_err());
    }

    #[test]
    fn missing_times() {
        let mut guide: Vec<TrackPoint> = (0..3)
            .map(|i| TrackPoint::new(0.0, i as f64, at(10 * i)))
            .collect();
        let buffer = vec![
            TrackPoint::new(1.0, 1.0, at(5)),
            TrackPoint::new(1.0, 1.0, None),
        ];
        assert!(merge(&guide, &buffer, MatchPolicy::Bisect).is_err());

        guide[2].time = None;
        assert!(merge(&guide, &buffer[..1], MatchPolicy::Bisect).is_err());
    }
}
