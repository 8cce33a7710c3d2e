//! Switch bus power on through a serial CAN adapter and print its answer.
//!
//! Run with:
//!   cargo run --example adapter-power -- /dev/ttyUSB0

use serialcan::frame::{header, Frame, FrameReader, FrameWriter};
use serialcan::transport::LineManager;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let device = std::env::args()
        .nth(1)
        .ok_or("usage: adapter-power <DEVICE>")?;

    let manager = LineManager::new();
    let channel = manager.open(&device)?;
    eprintln!("Opened {}", channel.line().display());

    let mut writer = FrameWriter::new(channel);
    let request = Frame::with_kind(header::SET_POWER, &[0x01])?;
    writer.send(request.as_bytes())?;

    let mut reader = FrameReader::new(writer.into_inner());
    let reply = Frame::new(reader.read_frame()?)?;
    eprintln!(
        "Adapter replied {} ({} bytes)",
        reply.kind_name(),
        reply.len()
    );

    reader.into_inner().close();
    Ok(())
}
