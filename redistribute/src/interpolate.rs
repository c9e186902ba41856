use model::TrackPoint;

/// Spreads the geometry between two anchors evenly over `slots`, appending the results to
/// `out`. Each slot keeps its own time; only latitude, longitude, and altitude come from the
/// interpolation.
pub fn fill(out: &mut Vec<TrackPoint>, from: &TrackPoint, to: &TrackPoint, slots: &[TrackPoint]) {
    for (slot, loc) in slots.iter().zip(from.interpolate(to, slots.len())) {
        out.push(slot.with_location(loc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn keeps_slot_times() {
        let time = |s| {
            NaiveDate::from_ymd_opt(2022, 1, 1).and_then(|d| d.and_hms_opt(0, 0, s))
        };
        let from = TrackPoint::new(0.0, 0.0, time(0));
        let to = TrackPoint::new(0.0, 4.0, time(40));
        let slots = vec![
            TrackPoint::new(9.0, 9.0, time(3)),
            TrackPoint::new(9.0, 9.0, time(5)),
            TrackPoint::new(9.0, 9.0, time(39)),
        ];

        let mut out = Vec::new();
        fill(&mut out, &from, &to, &slots);
        assert_eq!(out.len(), 3);
        for (i, pt) in out.iter().enumerate() {
            assert_eq!(pt.time, slots[i].time);
            assert_eq!(pt.latitude, 0.0);
            assert!((pt.longitude - (i + 1) as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn nothing_to_fill() {
        let pt = TrackPoint::new(1.0, 1.0, None);
        let mut out = vec![pt.clone()];
        fill(&mut out, &pt, &pt, &[]);
        assert_eq!(out, vec![pt]);
    }
}
