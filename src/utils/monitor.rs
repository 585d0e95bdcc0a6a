#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Process memory at the end of one pipeline phase.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub rss_mb: u64,
    pub peak_rss_mb: u64,
    pub cpu_usage: f32,
    pub elapsed: Duration,
}

/// Samples resident memory between pipeline phases.
/// Every stage holds its full dataset in memory, so peak RSS against the
/// table's row count is the number to watch.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
    start_time: Instant,
    peak_rss_mb: Mutex<u64>,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let pid = if enabled {
            match sysinfo::get_current_pid() {
                Ok(pid) => Some(pid),
                Err(e) => {
                    tracing::warn!("System monitoring unavailable: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            start_time: Instant::now(),
            peak_rss_mb: Mutex::new(0),
        }
    }

    pub fn sample(&self) -> Option<PhaseStats> {
        let pid = self.pid?;
        let mut system = self.system.lock().ok()?;
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );

        let process = system.process(pid)?;
        let rss_mb = process.memory() / 1024 / 1024;

        let mut peak = self.peak_rss_mb.lock().ok()?;
        *peak = (*peak).max(rss_mb);

        Some(PhaseStats {
            rss_mb,
            peak_rss_mb: *peak,
            cpu_usage: process.cpu_usage(),
            elapsed: self.start_time.elapsed(),
        })
    }

    /// `rows` is the size of the table the phase produced, if any.
    pub fn log_phase(&self, phase: &str, rows: Option<usize>) {
        if let Some(stats) = self.sample() {
            let rows = rows.map_or_else(|| "-".to_string(), |n| n.to_string());
            tracing::info!(
                "{}: rows={} rss={}MB peak={}MB cpu={:.1}% elapsed={:?}",
                phase,
                rows,
                stats.rss_mb,
                stats.peak_rss_mb,
                stats.cpu_usage,
                stats.elapsed
            );
        }
    }

    pub fn log_summary(&self, rows: usize) {
        if let Some(stats) = self.sample() {
            let per_100k = if rows > 0 {
                stats.peak_rss_mb as f64 * 100_000.0 / rows as f64
            } else {
                0.0
            };
            tracing::info!(
                "Run finished in {:?}: {} rows, peak {}MB ({:.1}MB per 100k rows)",
                stats.elapsed,
                rows,
                stats.peak_rss_mb,
                per_100k
            );
        }
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// No-op stand-in when built without the cli feature
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_phase(&self, _phase: &str, _rows: Option<usize>) {}

    pub fn log_summary(&self, _rows: usize) {}
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_monitor_samples_nothing() {
        assert!(SystemMonitor::new(false).sample().is_none());
    }

    #[test]
    fn test_peak_never_drops_below_current() {
        let monitor = SystemMonitor::new(true);
        if let Some(first) = monitor.sample() {
            let second = monitor.sample().unwrap();
            assert!(second.peak_rss_mb >= first.peak_rss_mb);
            assert!(second.peak_rss_mb >= second.rss_mb);
        }
    }
}
