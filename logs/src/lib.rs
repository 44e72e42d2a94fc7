//! Logger setup for applications and tests embedding the script evaluator.
//!
//! Library crates only talk to the `log` facade; nothing is printed until one
//! of the `init` functions installs a logger.

extern crate ansi_term;
extern crate log;
extern crate env_logger;
extern crate time;

use std::io::Write;
use ansi_term::{Colour, Style};
use log::{Level, Record, SetLoggerError};

fn strftime() -> String {
	time::strftime("%Y-%m-%d %H:%M:%S %Z", &time::now()).unwrap_or_default()
}

pub trait LogFormatter: Send + Sync + 'static {
	fn format(&self, record: &Record) -> String;
}

/// `<timestamp> <level> <target> <message>`
pub struct DateLogFormatter;

impl LogFormatter for DateLogFormatter {
	fn format(&self, record: &Record) -> String {
		let timestamp = strftime();
		format!("{} {} {} {}", timestamp, record.level(), record.target(), record.args())
	}
}

/// Same layout as `DateLogFormatter`, with the level coloured for terminals.
pub struct DateAndColorLogFormatter;

fn level_style(level: Level) -> Style {
	match level {
		Level::Error => Colour::Red.bold(),
		Level::Warn => Colour::Yellow.bold(),
		Level::Info => Colour::Green.normal(),
		Level::Debug => Colour::Cyan.normal(),
		Level::Trace => Colour::Blue.normal(),
	}
}

impl LogFormatter for DateAndColorLogFormatter {
	fn format(&self, record: &Record) -> String {
		let timestamp = strftime();
		format!(
			"{} {} {} {}",
			Colour::Black.bold().paint(timestamp),
			level_style(record.level()).paint(record.level().to_string()),
			record.target(),
			record.args()
		)
	}
}

fn builder<T>(filters: &str, formatter: T) -> env_logger::Builder where T: LogFormatter {
	let mut builder = env_logger::Builder::new();
	builder.parse_filters(filters);
	builder.format(move |buf, record| writeln!(buf, "{}", formatter.format(record)));
	builder
}

/// Installs the global logger, e.g. `init("script=trace", DateLogFormatter)`.
///
/// Panics if a logger is already installed.
pub fn init<T>(filters: &str, formatter: T) where T: LogFormatter {
	if let Err(err) = try_init(filters, formatter) {
		panic!("Logger can be initialized only once: {}", err);
	}
}

/// Installs the global logger unless one is already installed.
pub fn try_init<T>(filters: &str, formatter: T) -> Result<(), SetLoggerError> where T: LogFormatter {
	builder(filters, formatter).try_init()
}
