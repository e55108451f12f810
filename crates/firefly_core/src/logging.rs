use std::{
    fmt,
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

use env_logger::{Builder, Env, Target};
use log::{Level, LevelFilter};

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Overrides `--log-level` with an env_logger filter spec such as
/// `firefly_core::algo::optimizer=trace`.
pub const LOG_ENV: &str = "FIREFLY_LOG";

const CRATE_PREFIX: &str = "firefly_core::";

/// Logger settings taken from the solver options.
#[derive(Clone, Debug, PartialEq)]
pub struct LogSettings {
    pub filter: LevelFilter,
    pub format: LogFormat,
    pub timestamp: bool,
    pub path: Option<PathBuf>,
}

impl LogSettings {
    pub fn from_options(options: &SolverOptions) -> Self {
        Self {
            filter: options.log_level.to_filter(),
            format: options.log_format,
            timestamp: options.log_timestamp,
            path: options.log_output_path().map(|p| p.to_path_buf()),
        }
    }
}

pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let settings = LogSettings::from_options(options);
    let mut builder = builder(&settings);

    match &settings.path {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create log output file {}: {e}",
                    path.display()
                ))
            })?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn builder(settings: &LogSettings) -> Builder {
    let format = settings.format;
    let timestamp = settings.timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(settings.filter)
        .parse_env(Env::new().filter(LOG_ENV))
        .write_style(env_logger::WriteStyle::Never)
        .format(move |buf, record| {
            let stamp = timestamp.then(|| buf.timestamp_millis().to_string());
            write_line(
                buf,
                format,
                stamp.as_deref(),
                record.level(),
                record.target(),
                record.args(),
            )
        });
    builder
}

fn write_line<W: Write + ?Sized>(
    out: &mut W,
    format: LogFormat,
    stamp: Option<&str>,
    level: Level,
    target: &str,
    args: &fmt::Arguments<'_>,
) -> io::Result<()> {
    if let Some(stamp) = stamp {
        write!(out, "{stamp} ")?;
    }
    match format {
        LogFormat::Compact => writeln!(out, "{} {args}", level_tag(level)),
        LogFormat::Pretty => writeln!(
            out,
            "{} [{}] {args}",
            level_tag(level),
            short_target(target)
        ),
    }
}

fn short_target(target: &str) -> &str {
    target.strip_prefix(CRATE_PREFIX).unwrap_or(target)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
