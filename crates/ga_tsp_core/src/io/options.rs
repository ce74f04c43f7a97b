use std::{env, path::Path};

use ga_tsp_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{Error, EvolutionConfig, Result};

/// Runtime options for a GA run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Number of random cities to generate when no input file is given.
    #[cli(long = "cities")]
    pub num_cities: usize,
    /// Tours per generation.
    #[cli(long = "population")]
    pub pop_size: usize,
    /// Generation budget.
    #[cli(long = "generations")]
    pub num_generations: usize,
    /// Per-position swap probability, within `[0, 1]`.
    #[cli(long = "mutation-rate")]
    pub mutation_rate: f64,
    #[cli(long = "tournament-size")]
    pub tournament_size: usize,
    /// Best tours copied unchanged into the next generation.
    #[cli(long = "elite-size")]
    pub elite_size: usize,
    /// Width of the region random cities are drawn from.
    #[cli(long = "width")]
    pub width: f64,
    /// Height of the region random cities are drawn from.
    #[cli(long = "height")]
    pub height: f64,
    /// Seed for every random draw of the run. Unset means a fresh seed, which is logged.
    #[cli(long = "seed")]
    #[kv(fmt = "opt")]
    pub seed: Option<u64>,
    /// Log progress at info level every N generations. Zero disables it.
    #[cli(long = "report-every")]
    pub report_every: usize,
    /// Structured logging level.
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
    /// Optional input file of `x,y` cities. Empty means generate random cities.
    #[cli(long = "input")]
    pub input: String,
    /// Optional output file path for the best tour. Empty means stdout.
    #[cli(long = "output")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
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

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        let EvolutionConfig {
            pop_size,
            num_generations,
            mutation_rate,
            tournament_size,
            elite_size,
        } = EvolutionConfig::default();
        Self {
            num_cities: 25,
            pop_size,
            num_generations,
            mutation_rate,
            tournament_size,
            elite_size,
            width: 100.0,
            height: 100.0,
            seed: None,
            report_every: 50,
            log_level: LogLevel::Info,
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

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
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

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        Ok(options)
    }

    /// Checks the settings the evolution core does not see. Population,
    /// rate and tournament settings are validated by [`EvolutionConfig`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::configuration(format!(
                    "{name} must be a finite value > 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn evolution_config(&self) -> EvolutionConfig {
        EvolutionConfig::new(self.pop_size, self.num_generations, self.mutation_rate)
            .with_tournament_size(self.tournament_size)
            .with_elite_size(self.elite_size)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  ga-tsp [options]\n",
            "  ga-tsp [options] --input cities.txt\n\n",
            "Options:\n",
            "  --cities <usize>\n",
            "  --population <usize>\n",
            "  --generations <usize>\n",
            "  --mutation-rate <f64>\n",
            "  --tournament-size <usize>\n",
            "  --elite-size <usize>\n",
            "  --width <f64>\n",
            "  --height <f64>\n",
            "  --seed <u64>\n",
            "  --report-every <usize>\n",
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
            "  ga-tsp --cities 50 --population 200 --generations 1000\n",
            "  ga-tsp --input cities.txt --output tour.txt --seed 7\n",
            "  ga-tsp --mutation-rate=0.02 --log-level=debug --log-format=pretty\n",
        )
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

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
