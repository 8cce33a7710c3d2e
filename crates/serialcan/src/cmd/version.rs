use serialcan_transport::BaudRate;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("serialcan {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: serialcan");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("SERIALCAN_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    let rates = BaudRate::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!("baud_rates: {rates}");
    println!("frame_forms: variable (1-16 bytes), fixed (13 bytes)");

    Ok(SUCCESS)
}
