#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

pub mod csv_io;
mod point;
mod track;

pub use self::point::{Location, TrackPoint};
pub use self::track::{Selection, Track};
