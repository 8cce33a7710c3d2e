use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Crates whose events reach the log; anything else a dependency emits is dropped.
const LOG_TARGETS: [&str; 3] = ["serialcan", "serialcan_frame", "serialcan_transport"];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

fn line_filter(level: LogLevel) -> Targets {
    LOG_TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, LevelFilter::from(level))
        })
}

/// Send line and frame events to stderr; stdout carries frames only.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::from(level))
        .with_ansi(false)
        .with_target(matches!(level, LogLevel::Debug | LogLevel::Trace));

    let _ = match format {
        LogFormat::Text => builder.finish().with(line_filter(level)).try_init(),
        LogFormat::Json => builder.json().finish().with(line_filter(level)).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    #[test]
    fn filter_covers_line_and_frame_crates() {
        let filter = line_filter(LogLevel::Debug);
        assert!(filter.would_enable("serialcan_frame::variable", &Level::DEBUG));
        assert!(filter.would_enable("serialcan_transport::line", &Level::INFO));
        assert!(filter.would_enable("serialcan::cmd::listen", &Level::DEBUG));
        assert!(!filter.would_enable("serialcan_frame::variable", &Level::TRACE));
    }

    #[test]
    fn filter_drops_other_crates() {
        let filter = line_filter(LogLevel::Trace);
        assert!(!filter.would_enable("clap_builder::parser", &Level::ERROR));
    }

    #[test]
    fn warn_level_keeps_receive_failures() {
        let filter = line_filter(LogLevel::Warn);
        assert!(filter.would_enable("serialcan_frame::variable", &Level::WARN));
        assert!(!filter.would_enable("serialcan_transport::line", &Level::INFO));
    }
}
