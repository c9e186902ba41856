use anyhow::Result;

use model::{Selection, Track, TrackPoint};

use crate::splice::splice;

/// Everything needed to reverse one editing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Undo {
    Memorize(UndoMemorize),
    Redistribute(UndoRedistribute),
}

/// Reverses memorizing a range: puts the points back in the track and restores whatever was
/// memorized before.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoMemorize {
    pub start: usize,
    pub memorized: Vec<TrackPoint>,
    pub previous: Vec<TrackPoint>,
}

/// Reverses a redistribution, or the delete-and-store done when nothing was memorized.
#[derive(Clone, Debug, PartialEq)]
pub struct UndoRedistribute {
    /// The interior guide points that were replaced
    pub replaced: Vec<TrackPoint>,
    pub start: usize,
    /// Where the end anchor sits after the operation
    pub end: usize,
    /// The memorized points before the operation
    pub buffer: Vec<TrackPoint>,
}

impl Undo {
    pub fn describe(&self) -> String {
        match self {
            Undo::Memorize(u) => format!("memorize {} points", u.memorized.len()),
            Undo::Redistribute(u) => format!("redistribute over {} points", u.replaced.len()),
        }
    }

    /// Restores the track, selection, and memorized points. Fails without changing anything
    /// if the track no longer has the shape this operation left behind.
    pub fn perform(
        self,
        track: &mut Track,
        selection: &mut Selection,
        buffer: &mut Vec<TrackPoint>,
    ) -> Result<()> {
        match self {
            Undo::Memorize(u) => u.perform(track, selection, buffer),
            Undo::Redistribute(u) => u.perform(track, selection, buffer),
        }
    }
}

impl UndoMemorize {
    fn perform(
        self,
        track: &mut Track,
        selection: &mut Selection,
        buffer: &mut Vec<TrackPoint>,
    ) -> Result<()> {
        let old = track.clone_contents();
        if self.start > old.len() {
            bail!(
                "Can't restore memorized points at {}; the track only has {} points",
                self.start,
                old.len()
            );
        }

        let mut restored = Vec::with_capacity(old.len() + self.memorized.len());
        restored.extend_from_slice(&old[..self.start]);
        restored.extend(self.memorized.iter().cloned());
        restored.extend_from_slice(&old[self.start..]);

        track.replace_contents(restored);
        if self.memorized.is_empty() {
            selection.clear_all();
        } else {
            selection.select_range(self.start, self.start + self.memorized.len() - 1);
        }
        *buffer = self.previous;
        Ok(())
    }
}

impl UndoRedistribute {
    fn perform(
        self,
        track: &mut Track,
        selection: &mut Selection,
        buffer: &mut Vec<TrackPoint>,
    ) -> Result<()> {
        let old = track.clone_contents();
        if self.start >= self.end || self.end >= old.len() {
            bail!(
                "Can't restore points between {} and {}; the track has {} points",
                self.start,
                self.end,
                old.len()
            );
        }

        let num_replaced = self.replaced.len();
        track.replace_contents(splice(&old, self.start, self.end, self.replaced));
        selection.select_range(self.start, self.start + num_replaced + 1);
        *buffer = self.buffer;
        Ok(())
    }
}
