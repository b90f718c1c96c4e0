//! Terminal output for the CLI surface.
//!
//! Status lines go to stderr; listings and file content go to stdout so they
//! can be piped.

use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::style::{Color, Stylize};

use crate::bridge::{Device, DeviceState};
use crate::fs::FileEntry;

const INDENT: &str = "  ";
const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const GLYPH_BULLET: &str = "•";

/// Injectable output interface used by command handlers.
pub trait RenderSink: Send + Sync {
    fn section(&self, title: &str);
    fn activity(&self, text: &str);
    fn field(&self, key: &str, value: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
    fn listing(&self, entries: &[FileEntry]);
    fn devices(&self, devices: &[Device]);
    fn content(&self, text: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl RenderSink for Renderer {
    fn section(&self, title: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                GLYPH_BULLET.with(Color::DarkGrey),
                title.with(Color::White).bold()
            );
        } else {
            eprintln!("{title}:");
        }
    }

    fn activity(&self, text: &str) {
        if self.color {
            eprintln!("{} {}", GLYPH_BULLET.with(Color::DarkGrey), text.with(Color::Green));
        } else {
            eprintln!("{text}");
        }
    }

    fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{INDENT}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                value.with(Color::White)
            );
        } else {
            eprintln!("{INDENT}{key}: {value}");
        }
    }

    fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }

    fn listing(&self, entries: &[FileEntry]) {
        for entry in entries {
            let row = format_entry_row(entry);
            if self.color && entry.is_directory {
                println!("{}", row.with(Color::Blue).bold());
            } else {
                println!("{row}");
            }
        }
    }

    fn devices(&self, devices: &[Device]) {
        if devices.is_empty() {
            eprintln!("no devices attached");
            return;
        }
        for device in devices {
            let state = device.state.to_string();
            if self.color {
                let color = match device.state {
                    DeviceState::Ready => Color::Green,
                    DeviceState::Unauthorized => Color::Yellow,
                    DeviceState::Offline => Color::DarkGrey,
                };
                println!("{}\t{}", device.serial, state.with(color));
            } else {
                println!("{}\t{state}", device.serial);
            }
        }
    }

    fn content(&self, text: &str) {
        print!("{text}");
        if !text.is_empty() && !text.ends_with('\n') {
            println!();
        }
    }
}

/// `d  4.0K  2024-01-20  name/` style row.
pub fn format_entry_row(entry: &FileEntry) -> String {
    let kind = if entry.is_directory { 'd' } else { '-' };
    let size = if entry.is_directory {
        "-".to_string()
    } else {
        format_size(entry.size)
    };
    let date = entry
        .modified
        .map(format_date)
        .unwrap_or_else(|| "-".to_string());
    let suffix = if entry.is_directory { "/" } else { "" };
    format!("{kind} {size:>7}  {date:<10}  {}{suffix}", entry.name)
}

/// Human-readable size with binary units.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["K", "M", "G", "T", "P"];
    if bytes < 1024 {
        return format!("{bytes}B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1}{}", UNITS[unit])
}

/// `YYYY-MM-DD` in UTC.
fn format_date(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let (y, m, d) = civil_from_days((secs / 86_400) as i64);
    format!("{y:04}-{m:02}-{d:02}")
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let y = yoe + era * 400 + i64::from(m <= 2);
    (y, m, d)
}
