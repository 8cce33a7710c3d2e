mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "serialcan", version, about = "Serial CAN adapter CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use serialcan_frame::FrameForm;

    use super::*;

    #[test]
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from(["serialcan", "send", "/dev/ttyUSB0", "5101", "--wait"])
            .expect("send args should parse");

        match cli.command {
            Command::Send(args) => {
                assert_eq!(args.hex, "5101");
                assert_eq!(args.form, FrameForm::Variable);
                assert_eq!(args.line.baud, 115_200);
                assert!(args.wait);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_listen_with_fixed_form_and_baud() {
        let cli = Cli::try_parse_from([
            "serialcan",
            "listen",
            "/dev/ttyUSB0",
            "--form",
            "fixed",
            "--baud",
            "57600",
            "--count",
            "3",
        ])
        .expect("listen args should parse");

        match cli.command {
            Command::Listen(args) => {
                assert_eq!(args.form, FrameForm::Fixed);
                assert_eq!(args.line.baud, 57_600);
                assert_eq!(args.count, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_form() {
        let err = Cli::try_parse_from(["serialcan", "listen", "/dev/ttyUSB0", "--form", "nibble"])
            .expect_err("unknown form should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["serialcan", "status", "/dev/ttyS0", "--format", "json"])
            .expect("status args should parse");
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
        assert!(matches!(cli.command, Command::Status(_)));
    }
}
