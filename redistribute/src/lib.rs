#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod buffer;
mod editor;
mod interpolate;
mod merge;
mod metrics;
mod search;
mod splice;
mod undo;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{Selection, Track, TrackPoint};

pub use self::buffer::memorize;
pub use self::editor::Editor;
pub use self::merge::{merge, Merged};
pub use self::metrics::SegmentMetrics;
pub use self::search::{find_best_match, MatchPolicy, Pacing, DEFAULT_TOLERANCE};
pub use self::splice::splice;
pub use self::undo::{Undo, UndoMemorize, UndoRedistribute};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub policy: MatchPolicy,
}

/// Replaces the points strictly inside the selection with the memorized points, then clears
/// the buffer and the selection. The two selected points stay put.
///
/// If nothing is memorized, the interior points are cut out and memorized instead, leaving the
/// selection on the two points around the cut.
///
/// Returns None if the selection doesn't cover at least two points of the track. Errors leave
/// everything untouched.
pub fn redistribute(
    track: &mut Track,
    selection: &mut Selection,
    buffer: &mut Vec<TrackPoint>,
    opts: &Options,
) -> Result<Option<Undo>> {
    let (start, end) = match selection.range() {
        Some(pair) => pair,
        None => return Ok(None),
    };
    if start == end || !selection.fits(track.num_points()) {
        debug!(
            "Can't redistribute over {}..={} of {} points",
            start,
            end,
            track.num_points()
        );
        return Ok(None);
    }
    if buffer.is_empty() {
        return Ok(delete_and_store(track, selection, buffer, start, end));
    }

    let old = track.clone_contents();
    let guide_size = end - start - 1;
    let merged = merge(&old[start..=end], buffer, opts.policy)?;
    debug!("Guide points matched to memorized {:?}", merged.anchors);

    let replaced = old[start + 1..end].to_vec();
    let new_end = end - guide_size + buffer.len();
    let new_points = splice(&old, start, end, merged.points);
    debug_assert_eq!(new_points.len(), old.len() - guide_size + buffer.len());

    let previous = std::mem::take(buffer);
    info!(
        "Redistributed {} memorized points over {} guide points",
        previous.len(),
        guide_size
    );
    track.replace_contents(new_points);
    selection.clear_all();

    Ok(Some(Undo::Redistribute(UndoRedistribute {
        replaced,
        start,
        end: new_end,
        buffer: previous,
    })))
}

// Nothing to redistribute, so cut the interior points and memorize them. Waypoints aren't
// treated specially.
fn delete_and_store(
    track: &mut Track,
    selection: &mut Selection,
    buffer: &mut Vec<TrackPoint>,
    start: usize,
    end: usize,
) -> Option<Undo> {
    if end - start == 1 {
        return None;
    }

    let old = track.clone_contents();
    let cut = old[start + 1..end].to_vec();
    track.replace_contents(splice(&old, start, end, Vec::new()));
    *buffer = cut.clone();
    selection.select_range(start, start + 1);
    info!("Nothing memorized; cut {} points to memorize instead", cut.len());

    Some(Undo::Redistribute(UndoRedistribute {
        replaced: cut,
        start,
        end: start + 1,
        buffer: Vec::new(),
    }))
}
