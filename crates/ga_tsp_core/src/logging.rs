use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record, debug, info};

use crate::{
    Error, Result,
    evolution::{GenerationObserver, GenerationReport},
    options::{LogFormat, SolverOptions},
};

/// Installs the global logger: `--log-level` filter, compact or pretty
/// lines, and stderr unless `--log-output` names a file.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let format = options.log_format;
    let with_timestamp = options.log_timestamp;

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(log_target(options)?)
        .format(move |buf: &mut Formatter, record: &Record<'_>| {
            if with_timestamp {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            let tag = level_tag(record.level());
            match format {
                LogFormat::Compact => writeln!(buf, "{tag} {}", record.args()),
                LogFormat::Pretty => writeln!(
                    buf,
                    "{tag:<5} {}:{} {}",
                    record.target(),
                    record.line().unwrap_or(0),
                    record.args()
                ),
            }
        })
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &SolverOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path)
        .map_err(|e| Error::other(format!("failed to create log file {}: {e}", path.display())))?;
    Ok(Target::Pipe(Box::new(file)))
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

/// Observer that turns generation reports into log lines: every `every`
/// generations at info, improvements at debug. `every == 0` keeps it quiet
/// at info.
#[derive(Clone, Copy, Debug)]
pub struct ProgressLogger {
    every: usize,
}

impl ProgressLogger {
    pub fn new(every: usize) -> Self {
        Self { every }
    }

    fn is_due(&self, generation: usize) -> bool {
        self.every != 0 && generation % self.every == 0
    }
}

impl GenerationObserver for ProgressLogger {
    fn on_generation(&mut self, report: &GenerationReport) {
        if self.is_due(report.generation) {
            info!(
                "progress: generation={} best={:.3} mean={:.3} best_overall={:.3}",
                report.generation,
                report.best_length,
                report.mean_length,
                report.best_overall_length
            );
        } else if report.improved {
            debug!(
                "progress: generation={} improved best_overall={:.3}",
                report.generation, report.best_overall_length
            );
        }
    }
}
