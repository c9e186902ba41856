#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

use abstutil::{prettyprint_usize, Timer};
use anyhow::Result;
use structopt::StructOpt;

use model::{csv_io, Track};
use redistribute::{Editor, MatchPolicy, Options, DEFAULT_TOLERANCE};

#[derive(StructOpt)]
struct Args {
    /// The path to a CSV track to edit
    #[structopt(long)]
    input: String,
    /// Where to write the edited track as CSV
    #[structopt(long)]
    output: String,
    /// The path to a CSV track whose points should be memorized before redistributing
    #[structopt(long)]
    memorized: Option<String>,
    /// Memorize and cut this inclusive range of the input first, as START END. --start and
    /// --end refer to the track after the cut.
    #[structopt(long, number_of_values = 2)]
    memorize: Option<Vec<usize>>,
    /// The point before the first one replaced by memorized points
    #[structopt(long)]
    start: usize,
    /// The point after the last one replaced by memorized points
    #[structopt(long)]
    end: usize,
    /// Stop searching once the velocities around a point agree within --tolerance
    #[structopt(long)]
    close_enough: bool,
    /// The fraction used by --close-enough
    #[structopt(long, requires = "close-enough")]
    tolerance: Option<f64>,
    /// The path to a JSON file with options
    #[structopt(long)]
    options: Option<String>,
}

impl Args {
    fn load_options(&self, timer: &mut Timer) -> Result<Options> {
        let mut opts = match self.options {
            Some(ref path) => abstio::maybe_read_json::<Options>(path.clone(), timer)?,
            None => Options::default(),
        };
        if self.close_enough {
            let tolerance = self.tolerance.unwrap_or(DEFAULT_TOLERANCE);
            if !(tolerance > 0.0) {
                bail!("--tolerance must be positive, not {}", tolerance);
            }
            opts.policy = MatchPolicy::CloseEnough { tolerance };
        }
        Ok(opts)
    }

    fn run(self, timer: &mut Timer) -> Result<()> {
        let opts = self.load_options(timer)?;

        timer.start("load tracks");
        let track = csv_io::load(fs_err::File::open(&self.input)?)?;
        describe(&self.input, &track);
        let memorized = match self.memorized {
            Some(ref path) => {
                let points = csv_io::load(fs_err::File::open(path)?)?;
                describe(path, &points);
                Some(points)
            }
            None => None,
        };
        timer.stop("load tracks");

        let mut editor = Editor::new(track, opts);
        if let Some(points) = memorized {
            editor.set_memorized(points.clone_contents());
        }
        if let Some(range) = self.memorize {
            editor.select(range[0], range[1]);
            if !editor.memorize_selection() {
                bail!("Can't memorize points {} through {}", range[0], range[1]);
            }
        }

        timer.start("redistribute");
        editor.select(self.start, self.end);
        if !editor.redistribute_selection()? {
            bail!(
                "Can't redistribute between points {} and {}",
                self.start,
                self.end
            );
        }
        timer.stop("redistribute");

        if !editor.memorized().is_empty() {
            warn!(
                "{} points were cut and memorized, and won't be in the output",
                prettyprint_usize(editor.memorized().len())
            );
        }
        describe(&self.output, &editor.track);
        csv_io::write(fs_err::File::create(&self.output)?, &editor.track)?;
        Ok(())
    }
}

fn describe(path: &str, track: &Track) {
    let span = match track.span() {
        Some(duration) => duration.to_string(),
        None => "no time".to_string(),
    };
    info!(
        "{}: {} points, {} long over {}",
        path,
        prettyprint_usize(track.num_points()),
        track.length(),
        span
    );
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());
    let mut timer = Timer::new("redistribute track");
    args.run(&mut timer)
}
