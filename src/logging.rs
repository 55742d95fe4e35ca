// src/logging.rs
//
// Log sink built on env_logger. Lines look like
// `[00:00:01.250][INFO] Fetch: OK id=42`, timestamped relative to process
// start. Always goes to stderr; also appended to a file when one is
// configured.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use env_logger::{Builder, Target, WriteStyle};
use log::{LevelFilter, SetLoggerError};

static START: OnceLock<Instant> = OnceLock::new();

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

pub fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

pub fn format_line(elapsed_ms: u128, level: log::Level, msg: &str) -> String {
    format!("[{}][{level}] {msg}\n", fmt_elapsed(elapsed_ms))
}

/// stderr plus a log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // stderr is best effort; the file decides the result
        let _ = io::stderr().write_all(buf);
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        self.file.flush()
    }
}

/// Install the global logger. Call once, before the window opens.
/// A log file that cannot be opened is skipped (stderr still works).
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<(), SetLoggerError> {
    start();

    let file = file.and_then(|p| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(p)
            .map_err(|e| eprintln!("Log file {} unavailable: {e}", p.display()))
            .ok()
    });
    let target = match file {
        Some(file) => Target::Pipe(Box::new(Tee { file })),
        None => Target::Stderr,
    };

    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .format(|buf, record| {
            let msg = record.args().to_string();
            let line = format_line(start().elapsed().as_millis(), record.level(), &msg);
            buf.write_all(line.as_bytes())
        })
        .target(target)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_zero_padded() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_723_004), "01:02:03.004");
    }

    #[test]
    fn line_carries_level_and_message() {
        let line = format_line(1_250, log::Level::Warn, "Search: failed");
        assert_eq!(line, "[00:00:01.250][WARN] Search: failed\n");
    }

    #[test]
    fn tee_writes_through_to_the_file() {
        let path = std::env::temp_dir().join(format!("hs_trends_tee_{}.log", std::process::id()));
        let file = File::create(&path).unwrap();
        let mut tee = Tee { file };
        tee.write_all(b"[00:00:00.000][INFO] Init: ok\n").unwrap();
        tee.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[00:00:00.000][INFO] Init: ok\n");
        let _ = std::fs::remove_file(&path);
    }
}
