use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
enum LogFile {
    Colors,
    Error,
}

impl LogFile {
    const ALL: [LogFile; 2] = [LogFile::Colors, LogFile::Error];

    fn file_name(self) -> &'static str {
        match self {
            LogFile::Colors => "colors.log",
            LogFile::Error => "error.log",
        }
    }
}

struct Logger {
    files: Mutex<BTreeMap<LogFile, File>>,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

const HEADER_RULE: &str = "----------------------------------------";

/// Opens `<root>/log/*.log` for appending. Calls after the first are no-ops,
/// and log lines written before `init` are dropped.
pub fn init(root: &Path) -> Result<(), String> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let log_dir = root.join("log");
    std::fs::create_dir_all(&log_dir)
        .map_err(|err| format!("log directory create failed: {}", err))?;

    let mut files = BTreeMap::new();
    for log_file in LogFile::ALL {
        let name = log_file.file_name();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join(name))
            .map_err(|err| format!("open log {} failed: {}", name, err))?;
        if file.metadata().map(|m| m.len()).unwrap_or(0) == 0 {
            write_header(&mut file, name)?;
        }
        files.insert(log_file, file);
    }

    // a concurrent init may have won the race; either logger is fine
    let _ = LOGGER.set(Logger {
        files: Mutex::new(files),
    });
    Ok(())
}

/// Override changes made by staff.
pub fn log_colors(message: &str) {
    log_timestamped(LogFile::Colors, message);
}

pub fn log_error(message: &str) {
    log_timestamped(LogFile::Error, message);
}

fn log_timestamped(log_file: LogFile, message: &str) {
    if let Some(logger) = LOGGER.get() {
        let line = format!("[{}] {}\n", format_timestamp(unix_timestamp()), message);
        let _ = write_line(logger, log_file, &line);
    }
}

fn write_line(logger: &Logger, log_file: LogFile, line: &str) -> std::io::Result<()> {
    let mut files = logger
        .files
        .lock()
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "log lock poisoned"))?;
    if let Some(file) = files.get_mut(&log_file) {
        file.write_all(line.as_bytes())?;
        file.flush()?;
    }
    Ok(())
}

fn write_header(file: &mut File, name: &str) -> Result<(), String> {
    let started = format_timestamp(unix_timestamp());
    writeln!(file, "{HEADER_RULE}\nchatcolors {name} - started {started} UTC\n{HEADER_RULE}")
        .map_err(|err| format!("header write failed: {}", err))
}

/// `YYYY-MM-DD HH:MM:SS` in UTC.
fn format_timestamp(ts: i64) -> String {
    let secs = ts.max(0);
    let days = secs / 86_400;
    let seconds_of_day = secs % 86_400;
    let (year, month, day) = civil_from_days(days);
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year,
        month,
        day,
        seconds_of_day / 3_600,
        (seconds_of_day % 3_600) / 60,
        seconds_of_day % 60
    )
}

fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_epoch() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn formats_leap_day() {
        // 2024-02-29 12:34:56 UTC
        assert_eq!(format_timestamp(1_709_210_096), "2024-02-29 12:34:56");
    }

    #[test]
    fn negative_timestamps_clamp_to_epoch() {
        assert_eq!(format_timestamp(-5), "1970-01-01 00:00:00");
    }

    #[test]
    fn logging_before_init_is_a_no_op() {
        log_colors("dropped");
        log_error("dropped");
    }

    #[test]
    fn init_creates_log_files() {
        let root = std::env::temp_dir().join(format!("chatcolors-log-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&root);
        init(&root).unwrap();
        // another test may have initialized the logger first
        if root.join("log").exists() {
            let header = std::fs::read_to_string(root.join("log").join("colors.log")).unwrap();
            assert!(header.contains("chatcolors colors.log - started"));
        }
        let _ = std::fs::remove_dir_all(&root);
    }
}
