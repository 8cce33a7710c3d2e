use serialcan_frame::{FrameCodec, FrameError, FrameReader};
use tracing::info;

use crate::cmd::{restore_on_interrupt, ListenArgs};
use crate::exit::{frame_error, transport_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: ListenArgs, format: OutputFormat) -> CliResult<i32> {
    let manager = args.line.manager()?;
    let channel = manager
        .open(&args.line.device)
        .map_err(|err| transport_error("open failed", err))?;
    restore_on_interrupt(&manager)?;

    let device = args.line.device_name();
    let mut reader = FrameReader::with_codec(channel, args.form);
    let mut printed = 0usize;

    loop {
        if args.count.is_some_and(|count| printed >= count) {
            break;
        }

        let frame = match reader.read_frame() {
            Ok(frame) => frame,
            Err(err) if line_closed(&err) => {
                info!(%device, %err, "line closed");
                break;
            }
            Err(err) => return Err(frame_error("receive failed", err)),
        };

        print_frame(&frame, reader.codec().form(), &device, format);
        printed = printed.saturating_add(1);
    }

    reader.into_inner().close();
    Ok(SUCCESS)
}

/// End of stream before a header, or a line that hung up under us (EIO).
fn line_closed(err: &FrameError) -> bool {
    match err {
        FrameError::ShortRead { read: 0, .. } => true,
        FrameError::Io(source) => source.raw_os_error() == Some(libc::EIO),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn eof_before_header_closes_line() {
        let err = FrameError::ShortRead {
            expected: 1,
            read: 0,
        };
        assert!(line_closed(&err));
    }

    #[test]
    fn hangup_closes_line() {
        let err = FrameError::Io(io::Error::from_raw_os_error(libc::EIO));
        assert!(line_closed(&err));
    }

    #[test]
    fn truncated_frame_and_other_errors_fail() {
        let truncated = FrameError::ShortRead {
            expected: 3,
            read: 1,
        };
        assert!(!line_closed(&truncated));
        let denied = FrameError::Io(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!line_closed(&denied));
    }
}
