// Host permission checks for perf counters (kernel.perf_event_paranoid)

use std::io;
use std::path::Path;

use nix::unistd::geteuid;

use crate::error::{PerfdefsError, Result};

pub const PERF_EVENT_PARANOID_PATH: &str = "/proc/sys/kernel/perf_event_paranoid";

/// Value of the `perf_event_paranoid` sysctl
///
/// | Level | Unprivileged users may measure              |
/// |-------|---------------------------------------------|
/// | -1    | everything, including raw tracepoints       |
/// | 0     | CPU-wide events, no raw tracepoints         |
/// | 1     | their own tasks, user and kernel space      |
/// | 2     | their own tasks, user space only            |
/// | >= 3  | nothing (distribution extension)            |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ParanoidLevel(pub i32);

impl ParanoidLevel {
    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i32>()
            .map(ParanoidLevel)
            .map_err(|e| PerfdefsError::ParseError(format!("perf_event_paranoid {s:?}: {e}")))
    }

    /// Read the sysctl. A missing file means the kernel was built without
    /// perf events and yields `None`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("{} not found, perf events unsupported", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn allows_user_measurement(&self) -> bool {
        self.0 <= 2
    }

    pub fn allows_kernel_measurement(&self) -> bool {
        self.0 <= 1
    }

    pub fn allows_cpu_wide_measurement(&self) -> bool {
        self.0 <= 0
    }

    pub fn allows_raw_tracepoints(&self) -> bool {
        self.0 <= -1
    }
}

impl std::fmt::Display for ParanoidLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the current process may measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfAvailability {
    pub level: Option<ParanoidLevel>,
    /// Effective uid 0 bypasses the paranoid level
    pub privileged: bool,
}

impl PerfAvailability {
    pub fn new(level: Option<ParanoidLevel>, privileged: bool) -> Self {
        Self { level, privileged }
    }

    pub fn probe(path: &Path) -> Result<Self> {
        let level = ParanoidLevel::read(path)?;
        let privileged = geteuid().is_root();

        tracing::debug!(
            "perf_event_paranoid={:?}, privileged={}",
            level.map(|l| l.0),
            privileged
        );

        Ok(Self::new(level, privileged))
    }

    pub fn kernel_supported(&self) -> bool {
        self.level.is_some()
    }

    fn allows(&self, check: fn(&ParanoidLevel) -> bool) -> bool {
        match self.level {
            Some(level) => self.privileged || check(&level),
            None => false,
        }
    }

    pub fn user_measurement(&self) -> bool {
        self.allows(ParanoidLevel::allows_user_measurement)
    }

    pub fn kernel_measurement(&self) -> bool {
        self.allows(ParanoidLevel::allows_kernel_measurement)
    }

    pub fn cpu_wide_measurement(&self) -> bool {
        self.allows(ParanoidLevel::allows_cpu_wide_measurement)
    }

    pub fn raw_tracepoints(&self) -> bool {
        self.allows(ParanoidLevel::allows_raw_tracepoints)
    }
}

/// Whether this process can count its own user-space events
pub fn are_perf_counters_available() -> bool {
    match PerfAvailability::probe(Path::new(PERF_EVENT_PARANOID_PATH)) {
        Ok(availability) => availability.user_measurement(),
        Err(e) => {
            tracing::warn!("Failed to probe perf availability: {}", e);
            false
        }
    }
}
