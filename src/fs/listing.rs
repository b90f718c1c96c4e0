//! Normalization of raw directory listings into [`FileEntry`] sequences.
//!
//! Local listings arrive as structured stat records and map one-to-one. Remote
//! listings arrive as `ls -l` text and go through a positional heuristic that
//! assumes exactly seven metadata fields (permissions, links, owner, group,
//! size, date, time) before the name. Lines that do not fit are dropped rather
//! than reported; callers detect a failed listing through the bridge's exit
//! status, never through an empty result.
//!
//! Known limitation: listings whose metadata prefix has a different token
//! count (device nodes print `major, minor` instead of a size) shift the name
//! boundary. That is kept as-is. Symlink lines carry a ` -> target` suffix,
//! which is cut so the entry name stays a bare leaf.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::warn;

use crate::bridge::RemoteCommand;

use super::entry::{is_valid_entry_name, FileEntry, LocalStat};

/// Number of whitespace tokens preceding the file name in `ls -l` output.
const METADATA_FIELDS: usize = 7;

/// Parser for one remote listing format, paired with the command producing it.
pub trait ListingParser: Send + Sync {
    /// Build the remote command whose stdout this parser understands.
    fn command(&self, path: &str) -> RemoteCommand;
    /// Turn raw listing text into entries, silently skipping unparseable lines.
    fn parse(&self, raw: &str) -> Vec<FileEntry>;
}

/// `ls -l` text parser using the fixed seven-field prefix heuristic.
#[derive(Debug, Default, Clone, Copy)]
pub struct LsLongParser;

impl ListingParser for LsLongParser {
    fn command(&self, path: &str) -> RemoteCommand {
        RemoteCommand::exec("ls", &["-l"], [path])
    }

    fn parse(&self, raw: &str) -> Vec<FileEntry> {
        parse_remote_listing(raw)
    }
}

/// Map local stat results to entries, dropping records that failed to stat.
pub fn parse_local_listing<I>(records: I) -> Vec<FileEntry>
where
    I: IntoIterator<Item = std::io::Result<LocalStat>>,
{
    records
        .into_iter()
        .filter_map(|record| match record {
            Ok(stat) => Some(stat),
            Err(e) => {
                warn!(error = %e, "skipping unreadable local entry");
                None
            }
        })
        .filter(|stat| is_valid_entry_name(&stat.name))
        .map(|stat| FileEntry {
            size: if stat.is_directory { 0 } else { stat.size },
            name: stat.name,
            is_directory: stat.is_directory,
            modified: stat.modified,
        })
        .collect()
}

/// Parse `ls -l` output from the device into entries.
pub fn parse_remote_listing(raw: &str) -> Vec<FileEntry> {
    raw.lines().filter_map(parse_remote_line).collect()
}

fn parse_remote_line(line: &str) -> Option<FileEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 4 {
        return None;
    }

    let is_directory = tokens[0].starts_with('d');
    let size = if !is_directory && tokens.len() >= 5 {
        tokens[4].parse::<u64>().unwrap_or(0)
    } else {
        0
    };

    if tokens.len() <= METADATA_FIELDS {
        return None;
    }
    let mut name = tokens[METADATA_FIELDS..].join(" ");
    if tokens[0].starts_with('l') {
        if let Some((link, _target)) = name.split_once(" -> ") {
            name = link.to_string();
        }
    }
    if !is_valid_entry_name(&name) {
        return None;
    }

    Some(FileEntry {
        name,
        is_directory,
        size,
        modified: parse_listing_timestamp(tokens[5], tokens[6]),
    })
}

/// Parse the `YYYY-MM-DD HH:MM` pair printed by toybox `ls -l`, read as UTC.
fn parse_listing_timestamp(date: &str, time: &str) -> Option<SystemTime> {
    let mut date_parts = date.splitn(3, '-');
    let year: i64 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let day: u32 = date_parts.next()?.parse().ok()?;
    let (hour, minute) = time.split_once(':')?;
    let hour: u64 = hour.parse().ok()?;
    let minute: u64 = minute.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return None;
    }

    let days = days_from_civil(year, month, day);
    if days < 0 {
        return None;
    }
    let secs = days as u64 * 86_400 + hour * 3600 + minute * 60;
    Some(UNIX_EPOCH + Duration::from_secs(secs))
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let m = i64::from(month);
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn parses_file_with_spaces_in_name() {
        let raw = "-rw-rw---- 1 root sdcard_rw 1234 2024-01-20 12:00 My Document.txt";
        let entries = parse_remote_listing(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "My Document.txt");
        assert!(!entries[0].is_directory);
        assert_eq!(entries[0].size, 1234);
    }

    #[test]
    fn directories_report_zero_size() {
        let raw = "drwxrwx--x 3 root sdcard_rw 4096 2024-01-20 12:00 Android";
        let entries = parse_remote_listing(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Android");
        assert!(entries[0].is_directory);
        assert_eq!(entries[0].size, 0);
    }

    #[test]
    fn symlink_target_is_not_part_of_the_name() {
        let raw = "lrwxrwxrwx 1 root root 21 2024-01-20 12:00 sdcard -> /storage/self/primary";
        let entries = parse_remote_listing(raw);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "sdcard");
        assert!(!entries[0].is_directory);
    }

    #[test]
    fn lines_with_fewer_than_eight_tokens_are_dropped() {
        let raw = "total 48\n\
                   -rw-r--r-- 1 root root 12 2024-01-20 12:00\n\
                   drwx\n\
                   \n\
                   -rw-r--r-- 1 root root 12 2024-01-20 12:00 kept";
        let names: Vec<_> = parse_remote_listing(raw).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["kept"]);
    }

    #[test]
    fn dot_entries_are_dropped() {
        let raw = "drwxr-xr-x 2 root root 4096 2024-01-20 12:00 .\n\
                   drwxr-xr-x 9 root root 4096 2024-01-20 12:00 ..\n\
                   -rw-r--r-- 1 root root 5 2024-01-20 12:00 .hidden";
        let names: Vec<_> = parse_remote_listing(raw).into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec![".hidden"]);
    }

    #[test]
    fn directory_flag_follows_first_character_only() {
        let raw = "d--------- 1 a b 0 2024-01-20 12:00 dir\n\
                   l--------- 1 a b 0 2024-01-20 12:00 link\n\
                   -d-------- 1 a b 0 2024-01-20 12:00 file";
        let flags: Vec<_> = parse_remote_listing(raw)
            .into_iter()
            .map(|e| (e.name, e.is_directory))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("dir".to_string(), true),
                ("link".to_string(), false),
                ("file".to_string(), false),
            ]
        );
    }

    #[test]
    fn unparseable_size_defaults_to_zero() {
        let raw = "crw-rw-rw- 1 root root 1, 3 2024-01-20 12:00 null";
        let entries = parse_remote_listing(raw);
        // Device nodes shift the name boundary; the documented heuristic keeps
        // whatever lands after the seventh token.
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[0].name, "12:00 null");
    }

    #[test]
    fn error_text_yields_empty_listing() {
        assert!(parse_remote_listing("ls: /nope: No such file or directory").is_empty());
        assert!(parse_remote_listing("").is_empty());
    }

    #[test]
    fn timestamp_is_parsed_as_utc() {
        let raw = "-rw-r--r-- 1 root root 1 2024-01-20 12:00 a";
        let modified = parse_remote_listing(raw)[0].modified.expect("timestamp");
        let secs = modified.duration_since(UNIX_EPOCH).unwrap().as_secs();
        assert_eq!(secs, 1_705_752_000);
    }

    #[test]
    fn malformed_timestamp_is_none() {
        let raw = "-rw-r--r-- 1 root root 1 Jan 20 a";
        assert_eq!(parse_remote_listing(raw)[0].modified, None);
    }

    #[test]
    fn local_listing_drops_failed_stats() {
        let records = vec![
            Ok(LocalStat {
                name: "a.txt".into(),
                is_directory: false,
                size: 3,
                modified: None,
            }),
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Ok(LocalStat {
                name: "dir".into(),
                is_directory: true,
                size: 4096,
                modified: None,
            }),
        ];
        let entries = parse_local_listing(records);
        assert_eq!(entries, vec![FileEntry::file("a.txt", 3), FileEntry::directory("dir")]);
    }

    #[test]
    fn ls_parser_builds_long_listing_command() {
        let cmd = LsLongParser.command("/sdcard/My Files");
        assert_eq!(cmd.render_remote(), "ls -l \"/sdcard/My Files\"");
    }
}
