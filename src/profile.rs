//! src/profile.rs
//!
//! Geheugenprofiel van een stuk werk: een monitor-thread leest met een vast
//! interval het resident set size (RSS) van het eigen proces uit, terwijl de
//! aanroeper het werk uitvoert. Na afloop blijven piek en gemiddelde over.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use sysinfo::{Pid, System};

/// Standaard interval tussen twee metingen.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// Samenvatting van de RSS-metingen, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryProfile {
    pub peak_bytes: u64,
    pub average_bytes: f64,
    /// Aantal geslaagde metingen; 0 als het proces niet uit te lezen was.
    pub samples: usize,
}

impl MemoryProfile {
    fn from_samples(samples: &[u64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let total: f64 = samples.iter().map(|&b| b as f64).sum();
        Self {
            peak_bytes: samples.iter().copied().max().unwrap_or(0),
            average_bytes: total / samples.len() as f64,
            samples: samples.len(),
        }
    }

    pub fn peak_mib(&self) -> f64 {
        self.peak_bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn average_mib(&self) -> f64 {
        self.average_bytes / (1024.0 * 1024.0)
    }
}

/// Leest het RSS van `pid`, of `None` als het proces niet gevonden wordt.
fn current_rss(system: &mut System, pid: Pid) -> Option<u64> {
    if !system.refresh_process(pid) {
        return None;
    }
    system.process(pid).map(|p| p.memory())
}

/// Voert `work` uit en meet ondertussen elke `interval` het RSS van dit proces.
/// De eerste meting gebeurt meteen bij de start, de laatste na afloop van `work`.
pub fn profile_memory<T, F>(interval: Duration, work: F) -> (T, MemoryProfile)
where
    F: FnOnce() -> T,
{
    let pid = match sysinfo::get_current_pid() {
        Ok(pid) => pid,
        Err(e) => {
            tracing::warn!(error = e, "memory profiling unavailable");
            return (work(), MemoryProfile::default());
        }
    };

    let stop = AtomicBool::new(false);
    let (result, samples) = thread::scope(|s| {
        let monitor = s.spawn(|| {
            let mut system = System::new();
            let mut samples = Vec::new();
            loop {
                let done = stop.load(Ordering::Acquire);
                if let Some(rss) = current_rss(&mut system, pid) {
                    samples.push(rss);
                }
                if done {
                    break samples;
                }
                thread::sleep(interval);
            }
        });
        let result = work();
        stop.store(true, Ordering::Release);
        (result, monitor.join().unwrap_or_default())
    });

    (result, MemoryProfile::from_samples(&samples))
}
