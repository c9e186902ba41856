use model::{Selection, Track, TrackPoint};

use crate::undo::{Undo, UndoMemorize};

/// Cuts the selected points out of the track and holds onto them as the memorized buffer,
/// replacing anything memorized before. The selection collapses onto the point after the cut.
/// Nothing happens without a valid selection.
pub fn memorize(
    track: &mut Track,
    selection: &mut Selection,
    buffer: &mut Vec<TrackPoint>,
) -> Option<Undo> {
    let (start, end) = selection.range()?;
    if !selection.fits(track.num_points()) {
        debug!(
            "Can't memorize {}..={} of {} points",
            start,
            end,
            track.num_points()
        );
        return None;
    }

    let old = track.clone_contents();
    let memorized = old[start..=end].to_vec();
    let mut remaining = Vec::with_capacity(old.len() - memorized.len());
    remaining.extend_from_slice(&old[..start]);
    remaining.extend_from_slice(&old[end + 1..]);

    let previous = std::mem::replace(buffer, memorized.clone());
    track.replace_contents(remaining);
    if start < track.num_points() {
        selection.select_range(start, start);
    } else {
        selection.clear_all();
    }

    Some(Undo::Memorize(UndoMemorize {
        start,
        memorized,
        previous,
    }))
}
