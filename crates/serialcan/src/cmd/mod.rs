use clap::{Args, Subcommand};
use std::path::PathBuf;

use serialcan_frame::FrameForm;
use serialcan_transport::{BaudRate, LineConfig, LineManager};

use crate::exit::{transport_error, CliError, CliResult, INTERRUPTED, INTERNAL};
use crate::output::OutputFormat;

pub mod listen;
pub mod send;
pub mod status;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a single frame.
    Send(SendArgs),
    /// Print received frames.
    Listen(ListenArgs),
    /// Print the modem control/status lines.
    Status(StatusArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Listen(args) => listen::run(args, format),
        Command::Status(args) => status::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Options shared by every command that opens a line.
#[derive(Args, Debug)]
pub struct LineArgs {
    /// Serial device path.
    pub device: PathBuf,
    /// Line speed in bits per second.
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,
}

impl LineArgs {
    pub fn manager(&self) -> CliResult<LineManager> {
        let baud_rate = BaudRate::try_from(self.baud)
            .map_err(|err| transport_error("invalid --baud", err))?;
        Ok(LineManager::with_config(LineConfig {
            baud_rate,
            ..LineConfig::default()
        }))
    }

    pub fn device_name(&self) -> String {
        self.device.display().to_string()
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    #[command(flatten)]
    pub line: LineArgs,
    /// Frame bytes as hex (whitespace and ':' separators allowed).
    pub hex: String,
    /// Wire form: variable (length in first byte) or fixed (13 bytes).
    #[arg(long, default_value = "variable")]
    pub form: FrameForm,
    /// Wait for one frame in reply and print it.
    #[arg(long)]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    #[command(flatten)]
    pub line: LineArgs,
    /// Wire form: variable (length in first byte) or fixed (13 bytes).
    #[arg(long, default_value = "variable")]
    pub form: FrameForm,
    /// Exit after receiving N frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub line: LineArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Restore every line the manager has touched when interrupted, since the
/// blocking read in progress will never return to drop its channel.
pub fn restore_on_interrupt(manager: &LineManager) -> CliResult<()> {
    let manager = manager.clone();
    ctrlc::set_handler(move || {
        manager.restore_all();
        std::process::exit(INTERRUPTED);
    })
    .map_err(|err| CliError::new(INTERNAL, format!("signal handler setup failed: {err}")))
}
