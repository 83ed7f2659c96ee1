// Counter name resolution: hardware, software and hardware cache events

use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use perfdefs_raw::{
    CacheEvent, CacheId, CacheOp, CacheResult, Category, EventLayout, HwCounter, PerfType,
    RawEvent, SwCounter,
};

use crate::error::{PerfdefsError, Result};

/// A counter that can be requested by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Hardware(HwCounter),
    Software(SwCounter),
    Cache(CacheEvent),
}

// Symbolic names used by perf(1)
pub const ALIASES: &[(&str, Counter)] = &[
    ("cycles", Counter::Hardware(HwCounter::CpuCycles)),
    ("cpu-cycles", Counter::Hardware(HwCounter::CpuCycles)),
    ("instructions", Counter::Hardware(HwCounter::Instructions)),
    ("cache-references", Counter::Hardware(HwCounter::CacheReferences)),
    ("cache-misses", Counter::Hardware(HwCounter::CacheMisses)),
    ("branches", Counter::Hardware(HwCounter::BranchInstructions)),
    ("branch-instructions", Counter::Hardware(HwCounter::BranchInstructions)),
    ("branch-misses", Counter::Hardware(HwCounter::BranchMisses)),
    ("bus-cycles", Counter::Hardware(HwCounter::BusCycles)),
    ("stalled-cycles-frontend", Counter::Hardware(HwCounter::StalledCyclesFrontend)),
    ("idle-cycles-frontend", Counter::Hardware(HwCounter::StalledCyclesFrontend)),
    ("stalled-cycles-backend", Counter::Hardware(HwCounter::StalledCyclesBackend)),
    ("idle-cycles-backend", Counter::Hardware(HwCounter::StalledCyclesBackend)),
    ("ref-cycles", Counter::Hardware(HwCounter::RefCpuCycles)),
    ("cpu-clock", Counter::Software(SwCounter::CpuClock)),
    ("task-clock", Counter::Software(SwCounter::TaskClock)),
    ("page-faults", Counter::Software(SwCounter::PageFaults)),
    ("faults", Counter::Software(SwCounter::PageFaults)),
    ("context-switches", Counter::Software(SwCounter::ContextSwitches)),
    ("cs", Counter::Software(SwCounter::ContextSwitches)),
    ("cpu-migrations", Counter::Software(SwCounter::CpuMigrations)),
    ("migrations", Counter::Software(SwCounter::CpuMigrations)),
    ("minor-faults", Counter::Software(SwCounter::PageFaultsMin)),
    ("major-faults", Counter::Software(SwCounter::PageFaultsMaj)),
    ("alignment-faults", Counter::Software(SwCounter::AlignmentFaults)),
    ("emulation-faults", Counter::Software(SwCounter::EmulationFaults)),
    ("dummy", Counter::Software(SwCounter::Dummy)),
];

/// perf(1) spelling of a cache event, e.g. `L1-dcache-load-misses`
pub fn perf_cache_alias(event: &CacheEvent) -> String {
    let cache = match event.id {
        CacheId::L1d => "L1-dcache",
        CacheId::L1i => "L1-icache",
        CacheId::Ll => "LLC",
        CacheId::Dtlb => "dTLB",
        CacheId::Itlb => "iTLB",
        CacheId::Bpu => "branch",
        CacheId::Node => "node",
    };
    let suffix = match (event.op, event.result) {
        (CacheOp::Read, CacheResult::Access) => "loads",
        (CacheOp::Read, CacheResult::Miss) => "load-misses",
        (CacheOp::Write, CacheResult::Access) => "stores",
        (CacheOp::Write, CacheResult::Miss) => "store-misses",
        (CacheOp::Prefetch, CacheResult::Access) => "prefetches",
        (CacheOp::Prefetch, CacheResult::Miss) => "prefetch-misses",
    };
    format!("{cache}-{suffix}")
}

// Lower-cased name -> counter. Composite cache names with ':' are parsed
// on demand instead.
static NAME_INDEX: Lazy<HashMap<String, Counter>> = Lazy::new(|| {
    let mut index = HashMap::new();

    for &(alias, counter) in ALIASES {
        index.insert(alias.to_ascii_lowercase(), counter);
    }

    for counter in Counter::all() {
        let mut names = vec![counter.name()];
        match counter {
            Counter::Hardware(hw) => names.push(hw.name().to_string()),
            Counter::Software(sw) => names.push(sw.name().to_string()),
            Counter::Cache(event) => {
                names.push(event.to_string());
                names.push(perf_cache_alias(&event));
            }
        }
        for name in names {
            index.entry(name.to_ascii_lowercase()).or_insert(counter);
        }
    }

    index
});

impl Counter {
    /// Every counter: hardware, then software, then the cache events
    pub fn all() -> Vec<Counter> {
        let mut counters: Vec<Counter> = HwCounter::all().into_iter().map(Counter::Hardware).collect();
        counters.extend(SwCounter::all().into_iter().map(Counter::Software));
        counters.extend(CacheEvent::all().into_iter().map(Counter::Cache));
        counters
    }

    /// Resolve a name: perf alias, hardware or software member name (bare or
    /// prefixed), or a composite cache event name
    pub fn from_name(name: &str) -> Result<Counter> {
        let key = name.trim().to_ascii_lowercase();
        if key.is_empty() {
            return Err(PerfdefsError::UnknownCounter(name.to_string()));
        }

        if let Some(counter) = NAME_INDEX.get(&key) {
            tracing::debug!("Resolved {:?} to {}", name, counter.name());
            return Ok(*counter);
        }

        match CacheEvent::from_name(&key) {
            Some(event) => {
                tracing::debug!("Resolved {:?} to cache event {}", name, event.full_name());
                Ok(Counter::Cache(event))
            }
            None => Err(PerfdefsError::UnknownCounter(name.trim().to_string())),
        }
    }

    /// Canonical name, as the kernel spells the constant
    pub fn name(&self) -> String {
        match self {
            Counter::Hardware(hw) => hw.full_name().to_string(),
            Counter::Software(sw) => sw.full_name().to_string(),
            Counter::Cache(event) => event.full_name(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Counter::Hardware(_) => Category::HwCounters,
            Counter::Software(_) => Category::SwCounters,
            Counter::Cache(_) => Category::Caches,
        }
    }

    pub fn perf_type(&self) -> PerfType {
        self.raw_event().perf_type
    }

    pub fn raw_event(&self) -> RawEvent {
        match self {
            Counter::Hardware(hw) => hw.to_raw_event(),
            Counter::Software(sw) => sw.to_raw_event(),
            Counter::Cache(event) => event.to_raw_event(),
        }
    }

    /// Inverse of [`Counter::raw_event`]
    pub fn from_raw_event(event: RawEvent) -> Result<Counter> {
        let counter = match event.perf_type {
            PerfType::Hardware => Counter::Hardware(event.decode()?),
            PerfType::Software => Counter::Software(event.decode()?),
            PerfType::HwCache => Counter::Cache(event.decode()?),
        };
        Ok(counter)
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Counter {
    type Err = PerfdefsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_count() {
        // 10 hardware + 10 software + 7 * 3 * 2 cache events
        assert_eq!(Counter::all().len(), 62);
    }

    #[test]
    fn test_spellings_resolve_to_same_counter() {
        let expected = Counter::Hardware(HwCounter::CpuCycles);
        for name in ["cycles", "CPU_CYCLES", "PERF_COUNT_HW_CPU_CYCLES", " cpu-cycles "] {
            assert_eq!(Counter::from_name(name).unwrap(), expected, "{name}");
        }

        let expected = Counter::Software(SwCounter::PageFaultsMin);
        for name in ["minor-faults", "page_faults_min", "PERF_COUNT_SW_PAGE_FAULTS_MIN"] {
            assert_eq!(Counter::from_name(name).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_cache_event_spellings() {
        let expected = Counter::Cache(CacheEvent::new(CacheId::L1d, CacheOp::Read, CacheResult::Miss));
        for name in [
            "PERF_COUNT_HW_CACHE_L1D_READ_MISS",
            "L1D_READ_MISS",
            "l1d:read:miss",
            "PERF_COUNT_HW_CACHE_L1D:READ:MISS",
            "L1-dcache-load-misses",
        ] {
            assert_eq!(Counter::from_name(name).unwrap(), expected, "{name}");
        }

        let llc_stores = Counter::from_name("LLC-stores").unwrap();
        assert_eq!(
            llc_stores,
            Counter::Cache(CacheEvent::new(CacheId::Ll, CacheOp::Write, CacheResult::Access))
        );
    }

    #[test]
    fn test_hardware_cache_counters_are_not_cache_events() {
        assert_eq!(
            Counter::from_name("PERF_COUNT_HW_CACHE_MISSES").unwrap(),
            Counter::Hardware(HwCounter::CacheMisses)
        );
        assert_eq!(
            Counter::from_name("cache-references").unwrap(),
            Counter::Hardware(HwCounter::CacheReferences)
        );
    }

    #[test]
    fn test_unknown_names() {
        for name in ["", "  ", "cycle", "L2_READ_MISS", "PERF_COUNT_HW_", "DTLB_READ"] {
            assert!(
                matches!(Counter::from_name(name), Err(PerfdefsError::UnknownCounter(_))),
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_raw_events() {
        let counter: Counter = "branch-misses".parse().unwrap();
        assert_eq!(counter.raw_event(), RawEvent::new(PerfType::Hardware, 5));

        let counter: Counter = "cs".parse().unwrap();
        assert_eq!(counter.perf_type(), PerfType::Software);
        assert_eq!(counter.raw_event().config, 3);

        let counter: Counter = "LL_WRITE_MISS".parse().unwrap();
        assert_eq!(counter.raw_event(), RawEvent::new(PerfType::HwCache, 0x10102));
        assert_eq!(counter.category(), Category::Caches);
    }

    #[test]
    fn test_from_raw_event() {
        for counter in Counter::all() {
            assert_eq!(Counter::from_raw_event(counter.raw_event()).unwrap(), counter);
        }
        assert!(Counter::from_raw_event(RawEvent::new(PerfType::Software, 42)).is_err());
    }

    #[test]
    fn test_canonical_names() {
        let names: Vec<String> = Counter::all().iter().map(|c| c.name()).collect();
        assert_eq!(names[0], "PERF_COUNT_HW_CPU_CYCLES");
        assert_eq!(names[19], "PERF_COUNT_SW_DUMMY");
        assert_eq!(names[20], "PERF_COUNT_HW_CACHE_L1D_READ_ACCESS");

        for counter in Counter::all() {
            assert_eq!(Counter::from_name(&counter.name()).unwrap(), counter);
        }
    }
}
