use anyhow::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Track, TrackPoint};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads a track from CSV with the columns `time,latitude,longitude,altitude`. Time and
/// altitude may be blank.
pub fn load<R: std::io::Read>(reader: R) -> Result<Track> {
    let mut points = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;

        let time = match rec.time.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(NaiveDateTime::parse_from_str(raw, TIME_FORMAT)?),
            _ => None,
        };
        if !rec.latitude.is_finite() || !rec.longitude.is_finite() {
            bail!(
                "Point {} has a bad position: {}, {}",
                points.len(),
                rec.latitude,
                rec.longitude
            );
        }

        points.push(TrackPoint {
            latitude: rec.latitude,
            longitude: rec.longitude,
            altitude: rec.altitude,
            time,
        });
    }

    let missing_times = points.iter().filter(|pt| pt.time.is_none()).count();
    if missing_times > 0 {
        warn!("{} of {} points have no time", missing_times, points.len());
    }
    Ok(Track::new(points))
}

pub fn write<W: std::io::Write>(writer: W, track: &Track) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    for pt in track.points() {
        out.serialize(Record {
            time: pt.time.map(|t| t.format(TIME_FORMAT).to_string()),
            latitude: pt.latitude,
            longitude: pt.longitude,
            altitude: pt.altitude,
        })?;
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
struct Record {
    time: Option<String>,
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_are_optional() {
        let input = "time,latitude,longitude,altitude\n\
                     2022-03-04 10:00:00,51.5,-0.1,12.5\n\
                     ,51.6,-0.2,\n";
        let track = load(input.as_bytes()).unwrap();
        assert_eq!(track.num_points(), 2);

        let first = track.get(0).unwrap();
        assert_eq!(first.altitude, Some(12.5));
        assert_eq!(
            first.time.unwrap().format(TIME_FORMAT).to_string(),
            "2022-03-04 10:00:00"
        );

        let second = track.get(1).unwrap();
        assert_eq!(second.time, None);
        assert_eq!(second.altitude, None);
        assert_eq!(second.longitude, -0.2);
    }

    #[test]
    fn write_then_load() {
        let input = "time,latitude,longitude,altitude\n\
                     2022-03-04 10:00:00,51.5,-0.1,12.5\n\
                     2022-03-04 10:00:07,51.25,-0.125,\n";
        let track = load(input.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write(&mut buf, &track).unwrap();
        assert_eq!(load(buf.as_slice()).unwrap(), track);
    }

    #[test]
    fn bad_time_is_an_error() {
        let input = "time,latitude,longitude,altitude\nyesterday,1.0,2.0,\n";
        assert!(load(input.as_bytes()).is_err());
    }
}
