use crate::cmd::StatusArgs;
use crate::exit::{transport_error, CliResult, SUCCESS};
use crate::output::{print_status, OutputFormat};

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    let manager = args.line.manager()?;
    let channel = manager
        .open(&args.line.device)
        .map_err(|err| transport_error("open failed", err))?;

    let status = channel
        .status()
        .map_err(|err| transport_error("status query failed", err))?;
    print_status(status, &args.line.device_name(), format);

    channel.close();
    Ok(SUCCESS)
}
