use std::{env, fmt, iter::Peekable, path::Path};

use log::LevelFilter;

use crate::{
    Error, Result,
    algo::{optimizer::FireflyConfig, runner},
    constants::{
        DEFAULT_ATTRACTION_PROBABILITY, DEFAULT_GENERATIONS, DEFAULT_POINT_RANGE,
        DEFAULT_POPULATION_SIZE,
    },
    utils::{parse_bool, write_kv_block},
};

/// Runtime options for the firefly solver.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Number of fireflies (candidate tours) per run.
    pub population_size: usize,
    /// Number of generations per run.
    pub generations: usize,
    /// Chance that a mismatched position is swapped toward the brighter tour.
    pub attraction_probability: f64,
    /// Base seed. Random when absent.
    pub seed: Option<u64>,
    /// Number of independent runs for the multi-run modes.
    pub runs: usize,
    /// Solver strategy to run: `single`, `multi-seed`, or `multi-parallel`.
    pub solver_mode: SolverMode,
    /// Generate this many random points instead of reading input. Zero reads input.
    pub random_points: usize,
    /// Upper bound of the integer coordinates of generated points.
    pub point_range: u32,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    pub log_output: String,
    /// Optional input file path for points. Empty means stdin.
    pub input: String,
    /// Optional output file path for the route. Empty means stdout.
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(invalid_choice("log-level", raw, "error|warn|info|debug|trace|off")),
        }
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        };
        write!(f, "{value}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(invalid_choice("log-format", raw, "compact|pretty")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        };
        write!(f, "{value}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverMode {
    Single,
    MultiSeed,
    MultiParallel,
}

impl SolverMode {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "multi-seed" => Ok(Self::MultiSeed),
            "multi-parallel" => Ok(Self::MultiParallel),
            _ => Err(invalid_choice(
                "solver-mode",
                raw,
                "single|multi-seed|multi-parallel",
            )),
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Single => "single",
            Self::MultiSeed => "multi-seed",
            Self::MultiParallel => "multi-parallel",
        };
        write!(f, "{value}")
    }
}

fn invalid_choice(option: &str, raw: &str, expected: &str) -> Error {
    Error::invalid_input(format!(
        "Invalid value for --{option}: {raw} (expected {expected})"
    ))
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            generations: DEFAULT_GENERATIONS,
            attraction_probability: DEFAULT_ATTRACTION_PROBABILITY,
            seed: None,
            runs: runner::threads(),
            solver_mode: SolverMode::Single,
            random_points: 0,
            point_range: DEFAULT_POINT_RANGE,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            input: String::new(),
            output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            if options.apply_cli_option(&name, value.clone())? {
                continue;
            }

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    /// Applies a `--name value` option. Returns `false` for names it does not own.
    fn apply_cli_option(&mut self, name: &str, value: Option<String>) -> Result<bool> {
        let known = matches!(
            name,
            "population-size"
                | "generations"
                | "attraction-probability"
                | "seed"
                | "runs"
                | "solver-mode"
                | "random-points"
                | "point-range"
                | "log-level"
                | "log-format"
                | "log-output"
                | "input"
                | "output"
        );
        if !known {
            return Ok(false);
        }

        let raw =
            value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))?;

        match name {
            "population-size" => self.population_size = parse_number(name, &raw)?,
            "generations" => self.generations = parse_generations(&raw)?,
            "attraction-probability" => self.attraction_probability = parse_number(name, &raw)?,
            "seed" => self.seed = Some(parse_number(name, &raw)?),
            "runs" => self.runs = parse_number(name, &raw)?,
            "solver-mode" => self.solver_mode = SolverMode::parse(&raw)?,
            "random-points" => self.random_points = parse_number(name, &raw)?,
            "point-range" => self.point_range = parse_number(name, &raw)?,
            "log-level" => self.log_level = LogLevel::parse(&raw)?,
            "log-format" => self.log_format = LogFormat::parse(&raw)?,
            "log-output" => self.log_output = raw,
            "input" => self.input = raw,
            _ => self.output = raw,
        }
        Ok(true)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  firefly-tsp [options] [--input points.txt]\n",
            "  firefly-tsp [options] < points.txt\n",
            "  firefly-tsp [options] --random-points 30\n\n",
            "Options:\n",
            "  --population-size <usize>\n",
            "  --generations <usize>\n",
            "  --attraction-probability <f64 in [0, 1]>\n",
            "  --seed <u64>\n",
            "  --runs <usize>\n",
            "  --solver-mode <single|multi-seed|multi-parallel>\n",
            "  --random-points <usize>\n",
            "  --point-range <u32>\n",
            "  --log-level <error|warn|info|debug|trace|off>\n",
            "  --log-format <compact|pretty>\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --log-output <path>\n",
            "  --input <path>\n",
            "  --output <path>\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  firefly-tsp --random-points 30 --seed 7 --log-level info\n",
            "  firefly-tsp --input points.txt --output route.txt\n",
            "  firefly-tsp --population-size 50 --generations 500 < points.txt\n",
            "  firefly-tsp --solver-mode=multi-parallel --runs=8 --random-points=40\n",
        )
    }

    pub fn firefly_config(&self) -> FireflyConfig {
        FireflyConfig {
            population_size: self.population_size,
            generations: self.generations,
            attraction_probability: self.attraction_probability,
        }
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_kv_block(
            f,
            &[
                ("population_size", self.population_size.to_string()),
                ("generations", self.generations.to_string()),
                (
                    "attraction_probability",
                    self.attraction_probability.to_string(),
                ),
                (
                    "seed",
                    self.seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
                ),
                ("runs", self.runs.to_string()),
                ("solver_mode", self.solver_mode.to_string()),
                ("random_points", self.random_points.to_string()),
                ("point_range", self.point_range.to_string()),
                ("log_level", self.log_level.to_string()),
                ("log_format", self.log_format.to_string()),
                ("log_timestamp", self.log_timestamp.to_string()),
                ("log_output", self.log_output.clone()),
                ("input", self.input.clone()),
                ("output", self.output.clone()),
            ],
        )
    }
}

fn split_arg(
    raw_name: &str,
    args: &mut Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}

fn parse_number<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_generations(raw: &str) -> Result<usize> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= 0 => {
            usize::try_from(value).map_err(|_| Error::InvalidGenerationCount(raw.to_string()))
        }
        _ => Err(Error::InvalidGenerationCount(raw.to_string())),
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
