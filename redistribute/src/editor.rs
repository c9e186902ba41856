use anyhow::Result;

use model::{Selection, Track, TrackPoint};

use crate::{memorize, redistribute, Options, Undo};

/// Holds one track being edited, the current selection, the memorized points, and the history
/// needed to undo.
pub struct Editor {
    pub track: Track,
    pub selection: Selection,
    buffer: Vec<TrackPoint>,
    history: Vec<Undo>,
    opts: Options,
}

impl Editor {
    pub fn new(track: Track, opts: Options) -> Self {
        Self {
            track,
            selection: Selection::new(),
            buffer: Vec::new(),
            history: Vec::new(),
            opts,
        }
    }

    pub fn memorized(&self) -> &[TrackPoint] {
        &self.buffer
    }

    /// Memorize points captured somewhere else, like another track. This can't be undone.
    pub fn set_memorized(&mut self, points: Vec<TrackPoint>) {
        self.buffer = points;
    }

    pub fn select(&mut self, start: usize, end: usize) {
        self.selection.select_range(start, end);
    }

    pub fn num_undo(&self) -> usize {
        self.history.len()
    }

    /// Returns false if the selection made this a no-op.
    pub fn memorize_selection(&mut self) -> bool {
        match memorize(&mut self.track, &mut self.selection, &mut self.buffer) {
            Some(undo) => {
                self.record(undo);
                true
            }
            None => false,
        }
    }

    /// Returns false if the selection made this a no-op.
    pub fn redistribute_selection(&mut self) -> Result<bool> {
        match redistribute(
            &mut self.track,
            &mut self.selection,
            &mut self.buffer,
            &self.opts,
        )? {
            Some(undo) => {
                self.record(undo);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Reverses the most recent operation. Returns false if there's nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let undo = match self.history.pop() {
            Some(undo) => undo,
            None => return Ok(false),
        };
        info!("Undoing {}", undo.describe());
        if let Err(err) = undo
            .clone()
            .perform(&mut self.track, &mut self.selection, &mut self.buffer)
        {
            // Keep it around; the track is unchanged
            self.history.push(undo);
            return Err(err);
        }
        Ok(true)
    }

    fn record(&mut self, undo: Undo) {
        info!("Did {}", undo.describe());
        self.history.push(undo);
    }
}
