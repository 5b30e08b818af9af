#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct StageStats {
    pub cpu_usage: f32,
    pub memory_mb: u64,
    pub memory_percent: f32,
    pub peak_memory_mb: u64,
    pub elapsed: Duration,
}

/// 只追蹤本行程，未啟用 `--monitor` 時不建立 `System`
#[cfg(feature = "cli")]
#[derive(Default)]
pub struct SystemMonitor {
    tracked: Option<TrackedProcess>,
}

#[cfg(feature = "cli")]
struct TrackedProcess {
    system: System,
    pid: Pid,
    started: Instant,
    peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self::default();
        }

        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitoring unavailable: {}", e);
                return Self::default();
            }
        };

        let mut tracked = TrackedProcess {
            system: System::new(),
            pid,
            started: Instant::now(),
            peak_memory_mb: 0,
        };
        // 第一次取樣作為 CPU 使用率的基準
        tracked.refresh();

        Self {
            tracked: Some(tracked),
        }
    }

    pub fn sample(&mut self) -> Option<StageStats> {
        let tracked = self.tracked.as_mut()?;
        tracked.refresh();

        let process = tracked.system.process(tracked.pid)?;
        let memory_mb = process.memory() / 1024 / 1024;
        let total_mb = tracked.system.total_memory() / 1024 / 1024;
        tracked.peak_memory_mb = tracked.peak_memory_mb.max(memory_mb);

        Some(StageStats {
            cpu_usage: process.cpu_usage(),
            memory_mb,
            memory_percent: if total_mb > 0 {
                memory_mb as f32 / total_mb as f32 * 100.0
            } else {
                0.0
            },
            peak_memory_mb: tracked.peak_memory_mb,
            elapsed: tracked.started.elapsed(),
        })
    }

    pub fn log_stats(&mut self, stage: &str) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 {} - CPU: {:.1}%, Memory: {}MB ({:.1}%), Peak: {}MB, Time: {:?}",
                stage,
                stats.cpu_usage,
                stats.memory_mb,
                stats.memory_percent,
                stats.peak_memory_mb,
                stats.elapsed
            );
        }
    }

    pub fn log_final_stats(&mut self) {
        if let Some(stats) = self.sample() {
            tracing::info!(
                "📊 Total Time: {:?}, Peak Memory: {}MB",
                stats.elapsed,
                stats.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tracked.is_some()
    }
}

#[cfg(feature = "cli")]
impl TrackedProcess {
    fn refresh(&mut self) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            false,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        self.system.refresh_memory();
    }
}

#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn log_stats(&mut self, _stage: &str) {}

    pub fn log_final_stats(&mut self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
