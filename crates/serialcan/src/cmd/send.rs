use serialcan_frame::{FrameCodec, FrameReader, FrameWriter};

use crate::cmd::{restore_on_interrupt, SendArgs};
use crate::exit::{frame_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = parse_hex(&args.hex)?;
    if payload.len() > args.form.max_frame_len() {
        return Err(CliError::new(
            USAGE,
            format!(
                "{} bytes is too long for the {} form (max {})",
                payload.len(),
                args.form,
                args.form.max_frame_len()
            ),
        ));
    }

    let manager = args.line.manager()?;
    let channel = manager
        .open(&args.line.device)
        .map_err(|err| transport_error("open failed", err))?;

    let mut writer = FrameWriter::with_codec(channel, args.form);
    writer
        .send(&payload)
        .map_err(|err| frame_error("send failed", err))?;

    if args.wait {
        restore_on_interrupt(&manager)?;
        let mut reader = FrameReader::with_codec(writer.into_inner(), args.form);
        let frame = reader
            .read_frame()
            .map_err(|err| frame_error("receive failed", err))?;
        print_frame(&frame, reader.codec().form(), &args.line.device_name(), format);
        reader.into_inner().close();
    } else {
        writer.into_inner().close();
    }

    Ok(SUCCESS)
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    if digits.is_empty() {
        return Err(CliError::new(USAGE, "frame must not be empty"));
    }
    hex::decode(digits).map_err(|err| CliError::new(USAGE, format!("invalid hex frame: {err}")))
}
