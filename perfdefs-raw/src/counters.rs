//! Hardware and software counter tables
//!
//! Both lists keep the kernel's order; see [`crate::abi`] for the codes.

use crate::abi::{hw, sw, EventLayout, PerfType};
use crate::counter_enum;
use crate::error::{RawError, Result};

/// Number of generalized hardware counters
pub const HW_COUNTERS: usize = 10;

/// Number of software counters
pub const SW_COUNTERS: usize = 10;

counter_enum! {
    /// Generalized hardware counters (`PERF_HW_COUNTERS`)
    pub enum HwCounter: ("hardware counter", "PERF_COUNT_HW_") {
        /// Total cycles, affected by frequency scaling
        CpuCycles => ("CPU_CYCLES", hw::PERF_COUNT_HW_CPU_CYCLES),
        /// Retired instructions
        Instructions => ("INSTRUCTIONS", hw::PERF_COUNT_HW_INSTRUCTIONS),
        /// Cache accesses, usually last-level cache
        CacheReferences => ("CACHE_REFERENCES", hw::PERF_COUNT_HW_CACHE_REFERENCES),
        CacheMisses => ("CACHE_MISSES", hw::PERF_COUNT_HW_CACHE_MISSES),
        /// Retired branch instructions
        BranchInstructions => ("BRANCH_INSTRUCTIONS", hw::PERF_COUNT_HW_BRANCH_INSTRUCTIONS),
        BranchMisses => ("BRANCH_MISSES", hw::PERF_COUNT_HW_BRANCH_MISSES),
        BusCycles => ("BUS_CYCLES", hw::PERF_COUNT_HW_BUS_CYCLES),
        StalledCyclesFrontend => ("STALLED_CYCLES_FRONTEND", hw::PERF_COUNT_HW_STALLED_CYCLES_FRONTEND),
        StalledCyclesBackend => ("STALLED_CYCLES_BACKEND", hw::PERF_COUNT_HW_STALLED_CYCLES_BACKEND),
        /// Cycles not affected by frequency scaling
        RefCpuCycles => ("REF_CPU_CYCLES", hw::PERF_COUNT_HW_REF_CPU_CYCLES),
    }
}

counter_enum! {
    /// Kernel-maintained software counters (`PERF_SW_COUNTERS`)
    pub enum SwCounter: ("software counter", "PERF_COUNT_SW_") {
        CpuClock => ("CPU_CLOCK", sw::PERF_COUNT_SW_CPU_CLOCK),
        TaskClock => ("TASK_CLOCK", sw::PERF_COUNT_SW_TASK_CLOCK),
        PageFaults => ("PAGE_FAULTS", sw::PERF_COUNT_SW_PAGE_FAULTS),
        ContextSwitches => ("CONTEXT_SWITCHES", sw::PERF_COUNT_SW_CONTEXT_SWITCHES),
        CpuMigrations => ("CPU_MIGRATIONS", sw::PERF_COUNT_SW_CPU_MIGRATIONS),
        PageFaultsMin => ("PAGE_FAULTS_MIN", sw::PERF_COUNT_SW_PAGE_FAULTS_MIN),
        PageFaultsMaj => ("PAGE_FAULTS_MAJ", sw::PERF_COUNT_SW_PAGE_FAULTS_MAJ),
        AlignmentFaults => ("ALIGNMENT_FAULTS", sw::PERF_COUNT_SW_ALIGNMENT_FAULTS),
        EmulationFaults => ("EMULATION_FAULTS", sw::PERF_COUNT_SW_EMULATION_FAULTS),
        /// Placeholder event that never counts
        Dummy => ("DUMMY", sw::PERF_COUNT_SW_DUMMY),
    }
}

impl EventLayout for HwCounter {
    const PERF_TYPE: PerfType = PerfType::Hardware;

    fn to_config(&self) -> u64 {
        self.code()
    }

    fn from_config(config: u64) -> Result<Self> {
        Self::from_code(config).ok_or(RawError::InvalidConfig {
            perf_type: Self::PERF_TYPE.id(),
            config,
        })
    }
}

impl EventLayout for SwCounter {
    const PERF_TYPE: PerfType = PerfType::Software;

    fn to_config(&self) -> u64 {
        self.code()
    }

    fn from_config(config: u64) -> Result<Self> {
        Self::from_code(config).ok_or(RawError::InvalidConfig {
            perf_type: Self::PERF_TYPE.id(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HW_NAMES: [&str; HW_COUNTERS] = [
        "CPU_CYCLES",
        "INSTRUCTIONS",
        "CACHE_REFERENCES",
        "CACHE_MISSES",
        "BRANCH_INSTRUCTIONS",
        "BRANCH_MISSES",
        "BUS_CYCLES",
        "STALLED_CYCLES_FRONTEND",
        "STALLED_CYCLES_BACKEND",
        "REF_CPU_CYCLES",
    ];

    const SW_NAMES: [&str; SW_COUNTERS] = [
        "CPU_CLOCK",
        "TASK_CLOCK",
        "PAGE_FAULTS",
        "CONTEXT_SWITCHES",
        "CPU_MIGRATIONS",
        "PAGE_FAULTS_MIN",
        "PAGE_FAULTS_MAJ",
        "ALIGNMENT_FAULTS",
        "EMULATION_FAULTS",
        "DUMMY",
    ];

    #[test]
    fn test_hw_counter_names() {
        let names: Vec<&str> = HwCounter::all().iter().map(|c| c.name()).collect();
        assert_eq!(names, HW_NAMES);
        assert_eq!(HwCounter::COUNT, HW_COUNTERS);
    }

    #[test]
    fn test_sw_counter_names() {
        let names: Vec<&str> = SwCounter::all().iter().map(|c| c.name()).collect();
        assert_eq!(names, SW_NAMES);
        assert_eq!(SwCounter::COUNT, SW_COUNTERS);
    }

    #[test]
    fn test_codes_follow_position() {
        for (i, counter) in HwCounter::all().into_iter().enumerate() {
            assert_eq!(counter.code(), i as u64, "{counter}");
            assert_eq!(HwCounter::from_code(i as u64), Some(counter));
        }
        for (i, counter) in SwCounter::all().into_iter().enumerate() {
            assert_eq!(counter.code(), i as u64, "{counter}");
        }
        assert_eq!(HwCounter::from_code(HW_COUNTERS as u64), None);
    }

    #[test]
    fn test_full_names() {
        assert_eq!(HwCounter::CpuCycles.full_name(), "PERF_COUNT_HW_CPU_CYCLES");
        assert_eq!(SwCounter::PageFaultsMaj.full_name(), "PERF_COUNT_SW_PAGE_FAULTS_MAJ");
    }

    #[test]
    fn test_parse() {
        assert_eq!("instructions".parse::<HwCounter>(), Ok(HwCounter::Instructions));
        assert_eq!(
            "PERF_COUNT_SW_CONTEXT_SWITCHES".parse::<SwCounter>(),
            Ok(SwCounter::ContextSwitches)
        );
        // Member names do not leak across categories
        assert_eq!(
            "CPU_CLOCK".parse::<HwCounter>(),
            Err(RawError::UnknownName {
                category: "hardware counter",
                name: "CPU_CLOCK".to_string(),
            })
        );
    }

    #[test]
    fn test_event_layout() {
        let event = SwCounter::Dummy.to_raw_event();
        assert_eq!(event.perf_type, PerfType::Software);
        assert_eq!(event.config, 9);
        assert!(event.decode::<HwCounter>().is_err());
        assert_eq!(SwCounter::from_config(9), Ok(SwCounter::Dummy));
        assert!(HwCounter::from_config(10).is_err());
    }
}
