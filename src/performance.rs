//! Process diagnostics: elapsed time, resident memory and thread count.

use serde::Serialize;
use std::time::{Duration, Instant};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Snapshot of process resource usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceReport {
    /// Elapsed time as `HH:MM:SS.mmm`.
    pub time: String,

    /// Resident memory as `X.XX MB`.
    pub memory: String,

    /// Live threads in the process.
    pub threads: usize,
}

impl PerformanceReport {
    /// Captures a report measuring elapsed time from `started`.
    pub fn capture(started: Instant) -> Self {
        Self::from_parts(started.elapsed(), ProcessStatus::read())
    }

    fn from_parts(elapsed: Duration, status: ProcessStatus) -> Self {
        PerformanceReport {
            time: format_elapsed(elapsed),
            memory: format_memory(status.resident_bytes),
            threads: status.threads,
        }
    }
}

/// Formats a duration as `HH:MM:SS.mmm`. Hours keep counting past 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        millis / 3_600_000,
        (millis / 60_000) % 60,
        (millis / 1_000) % 60,
        millis % 1_000
    )
}

/// Formats a byte count as mebibytes with two decimals.
pub fn format_memory(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProcessStatus {
    resident_bytes: u64,
    threads: usize,
}

impl Default for ProcessStatus {
    fn default() -> Self {
        ProcessStatus {
            resident_bytes: 0,
            threads: 1,
        }
    }
}

impl ProcessStatus {
    #[cfg(target_os = "linux")]
    fn read() -> Self {
        match std::fs::read_to_string("/proc/self/status") {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                log::debug!("Cannot read /proc/self/status: {}", e);
                Self::default()
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    fn read() -> Self {
        Self::default()
    }

    /// Parses the `VmRSS` and `Threads` lines of `/proc/<pid>/status`.
    fn parse(content: &str) -> Self {
        let mut status = Self::default();

        for line in content.lines() {
            let mut fields = line.split_whitespace();
            match fields.next() {
                // Format: "VmRSS:     12345 kB"
                Some("VmRSS:") => {
                    if let Some(kilobytes) = fields.next().and_then(|v| v.parse::<u64>().ok()) {
                        status.resident_bytes = kilobytes * 1024;
                    }
                }
                Some("Threads:") => {
                    if let Some(threads) = fields.next().and_then(|v| v.parse::<usize>().ok()) {
                        status.threads = threads;
                    }
                }
                _ => {}
            }
        }

        status
    }
}
