//! Tracing setup for a process that owns the terminal.
//!
//! The TUI draws to stderr, so log lines cannot go there. The fmt layer writes
//! each formatted record into a `crossbeam_channel`; the event loop drains the
//! receiver on every tick into the log strip at the bottom of the screen.

use crossbeam_channel::{Receiver, Sender};
use tracing_subscriber::EnvFilter;

/// Env var holding an `EnvFilter` directive, e.g. `skypulse=debug`.
pub const LOG_ENV: &str = "SKYPULSE_LOG";
const DEFAULT_FILTER: &str = "skypulse=info,skypulse_core=info";

/// `io::Write` adapter that forwards each write as one line of text.
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let _ = self.sender.send(line.to_owned());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Installs the global subscriber and returns the receiving end of the log channel.
///
/// Safe to call more than once: later calls leave the first subscriber in
/// place and return a receiver that never yields.
pub fn init() -> Receiver<String> {
    let (tx, rx) = crossbeam_channel::unbounded();
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .compact()
        .with_writer(move || ChannelWriter { sender: tx.clone() })
        .try_init();
    rx
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn writer_splits_lines_and_skips_blanks() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut writer = ChannelWriter { sender: tx };
        writer.write_all(b"first\n\nsecond\n").unwrap();
        let lines: Vec<String> = rx.try_iter().collect();
        assert_eq!(lines, vec!["first", "second"]);
    }
}
