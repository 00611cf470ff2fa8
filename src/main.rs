mod app;
mod booking;
mod calendar;
mod clock;
mod config;
mod help;
mod source;
mod theme;
use crate::app::App;
use crate::calendar::{date_key, parse_date_key, AvailabilityCalendar};
use crate::clock::{Clock, FixedClock, LocalClock};
use crate::config::Config;
use crate::source::{ApiSource, BookingSource, FileSource};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::ffi::OsString;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use time::Date;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct RunOptions {
    venue: String,
    bookings_file: Option<PathBuf>,
    api_url: Option<String>,
    selected: Option<Date>,
    today: Option<Date>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut venue = None;
        let mut bookings_file = None;
        let mut api_url = None;
        let mut selected = None;
        let mut today = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('b') | Arg::Long("bookings") => {
                    bookings_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('a') | Arg::Long("api") => api_url = Some(parser.value()?.string()?),
                Arg::Short('s') | Arg::Long("selected") => {
                    selected = Some(parse_date(parser.value()?)?);
                }
                Arg::Short('t') | Arg::Long("today") => today = Some(parse_date(parser.value()?)?),
                Arg::Value(value) if venue.is_none() => venue = Some(value.string()?),
                _ => return Err(arg.unexpected()),
            }
        }
        let venue = venue.ok_or("missing VENUE_ID argument")?;
        Ok(Command::Run(RunOptions {
            venue,
            bookings_file,
            api_url,
            selected,
            today,
        }))
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let config = Config::from_env();
                init_logging(&config)?;
                // The clock has to be set up before anything spawns a thread.
                let clock: Box<dyn Clock> = match opts.today {
                    Some(date) => Box::new(FixedClock(date)),
                    None => Box::new(LocalClock::new()),
                };
                let source: Box<dyn BookingSource> = match opts.bookings_file {
                    Some(path) => Box::new(FileSource::new(path)),
                    None => {
                        let url = opts.api_url.as_deref().unwrap_or(&config.api_url);
                        Box::new(ApiSource::new(url).context("failed to set up API client")?)
                    }
                };
                let selected = opts.selected.map(date_key);
                let calendar = AvailabilityCalendar::new(clock, selected.as_deref(), &[])
                    .context("current date is outside the supported range")?;
                tracing::info!(venue = %opts.venue, ?source, "starting");
                let app = App::new(calendar, source, opts.venue, selected);
                let choice = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    Ok(app.run(terminal)?)
                })?;
                if let Some(date) = choice {
                    println!("{date}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: hallcal [options] <VENUE_ID>");
                println!();
                println!("Terminal availability calendar for function hall bookings");
                println!();
                println!("Options:");
                println!("  -a, --api URL            Fetch bookings from the booking API at URL");
                println!("                           [default: $HALLCAL_API_URL or http://localhost:5000]");
                println!("  -b, --bookings FILE      Read bookings from a JSON file instead of the API");
                println!("  -s, --selected YYYY-MM-DD");
                println!("                           Start with the given date selected");
                println!("  -t, --today YYYY-MM-DD   Treat the given date as today");
                println!("  -h, --help               Display this help message and exit");
                println!("  -V, --version            Show the program version and exit");
                println!();
                println!("The selected date, if any, is printed on exit.");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn parse_date(value: OsString) -> Result<Date, lexopt::Error> {
    let value = value.string()?;
    match parse_date_key(&value) {
        Ok(d) => Ok(d),
        Err(e) => Err(lexopt::Error::ParsingFailed {
            value,
            error: Box::new(e),
        }),
    }
}

/// Send logs to the file named by the configuration, if any.  The terminal
/// belongs to the calendar, so nothing is logged otherwise.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(());
    };
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter)
        .with_context(|| format!("invalid log filter {:?}", config.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
