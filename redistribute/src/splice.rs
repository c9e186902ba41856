use model::TrackPoint;

/// Keeps `old[..=start]` and `old[end..]`, replacing everything strictly between them with
/// `middle`. Requires `start < end < old.len()`.
pub fn splice(old: &[TrackPoint], start: usize, end: usize, middle: Vec<TrackPoint>) -> Vec<TrackPoint> {
    assert!(
        start < end && end < old.len(),
        "can't splice between {start} and {end} of {} points",
        old.len()
    );

    let expected_len = old.len() - (end - start - 1) + middle.len();
    let mut result = Vec::with_capacity(expected_len);
    result.extend_from_slice(&old[..=start]);
    result.extend(middle);
    result.extend_from_slice(&old[end..]);
    debug_assert_eq!(result.len(), expected_len);
    result
}
