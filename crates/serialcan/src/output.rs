use std::io::{IsTerminal, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serialcan_frame::{kind_name, CanFrame, FrameForm, FIXED_FRAME_LEN};
use serialcan_transport::ModemStatus;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FrameOutput<'a> {
    device: &'a str,
    form: &'static str,
    length: usize,
    kind: &'static str,
    hex: String,
    can: Option<String>,
    timestamp: String,
}

#[derive(Serialize)]
struct StatusOutput<'a> {
    device: &'a str,
    bits: i32,
    asserted: Vec<&'static str>,
}

/// Describe a received frame: header kind for the variable form, decoded
/// CAN block for the fixed form.
fn describe(frame: &[u8], form: FrameForm) -> (&'static str, Option<String>) {
    match form {
        FrameForm::Variable => (frame.first().copied().map_or("EMPTY", kind_name), None),
        FrameForm::Fixed => {
            let can = <&[u8; FIXED_FRAME_LEN]>::try_from(frame)
                .ok()
                .map(|block| CanFrame::from_bytes(block).to_string());
            ("CAN", can)
        }
    }
}

pub fn print_frame(frame: &[u8], form: FrameForm, device: &str, format: OutputFormat) {
    let (kind, can) = describe(frame, form);
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                device,
                form: form.name(),
                length: frame.len(),
                kind,
                hex: hex::encode(frame),
                can,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KIND", "SIZE", "DEVICE", "FRAME"])
                .add_row(vec![
                    kind.to_string(),
                    frame.len().to_string(),
                    device.to_string(),
                    can.unwrap_or_else(|| hex::encode(frame)),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "kind={} size={} device={} frame={}",
                kind,
                frame.len(),
                device,
                can.unwrap_or_else(|| hex::encode(frame))
            );
        }
        OutputFormat::Raw => {
            print_raw(frame);
        }
    }
}

pub fn print_status(status: ModemStatus, device: &str, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = StatusOutput {
                device,
                bits: status.bits(),
                asserted: status.asserted(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DTR", "RTS", "CTS", "DSR", "CD", "RI"])
                .add_row(
                    [
                        status.dtr(),
                        status.rts(),
                        status.cts(),
                        status.dsr(),
                        status.carrier(),
                        status.ring(),
                    ]
                    .map(|set| if set { "on" } else { "off" }),
                );
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("device={device} lines={status}");
        }
        OutputFormat::Raw => {
            println!("{:#06x}", status.bits());
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_variable_uses_header_kind() {
        let (kind, can) = describe(&[0x51, 0x01], FrameForm::Variable);
        assert_eq!(kind, "SET_POWER");
        assert!(can.is_none());
    }

    #[test]
    fn describe_fixed_decodes_can_block() {
        let block = [0, 0, 0, 1, 1, 0xAB, 0, 0, 0, 0, 0, 0, 0];
        let (kind, can) = describe(&block, FrameForm::Fixed);
        assert_eq!(kind, "CAN");
        assert_eq!(can.as_deref(), Some("[<00000001,n=0> 1: ab]"));
    }
}
