//! The five name lists as a whole
//!
//! `Category::names()` reproduces a list verbatim, in order. This is the
//! one place where the duplicated `PERF_CACHES` block is visible.

use crate::abi::PerfType;
use crate::cache::{CacheId, CacheOp, CacheResult, CACHE_LISTING};
use crate::counters::{HwCounter, SwCounter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    HwCounters,
    SwCounters,
    Caches,
    CacheOps,
    CacheResults,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::HwCounters => "PERF_HW_COUNTERS",
            Category::SwCounters => "PERF_SW_COUNTERS",
            Category::Caches => "PERF_CACHES",
            Category::CacheOps => "PERF_CACHE_OPS",
            Category::CacheResults => "PERF_CACHE_RESULTS",
        }
    }

    /// Short name accepted on command lines
    pub fn alias(&self) -> &'static str {
        match self {
            Category::HwCounters => "hw",
            Category::SwCounters => "sw",
            Category::Caches => "cache",
            Category::CacheOps => "cache-op",
            Category::CacheResults => "cache-result",
        }
    }

    pub fn all() -> Vec<Category> {
        vec![
            Category::HwCounters,
            Category::SwCounters,
            Category::Caches,
            Category::CacheOps,
            Category::CacheResults,
        ]
    }

    pub fn from_name(name: &str) -> Option<Category> {
        let name = name.trim();
        Self::all()
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name) || c.alias().eq_ignore_ascii_case(name))
    }

    /// Event type of the category's members, if they are events on their own.
    /// Cache operations and results are only fields of a cache event.
    pub fn perf_type(&self) -> Option<PerfType> {
        match self {
            Category::HwCounters => Some(PerfType::Hardware),
            Category::SwCounters => Some(PerfType::Software),
            Category::Caches => Some(PerfType::HwCache),
            Category::CacheOps | Category::CacheResults => None,
        }
    }

    /// The list exactly as published, duplicates included
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Category::Caches => CACHE_LISTING.iter().map(|c| c.name()).collect(),
            _ => self.distinct_names(),
        }
    }

    /// The list with repeated names dropped, in first-occurrence order
    pub fn distinct_names(&self) -> Vec<&'static str> {
        match self {
            Category::HwCounters => HwCounter::all().iter().map(|c| c.name()).collect(),
            Category::SwCounters => SwCounter::all().iter().map(|c| c.name()).collect(),
            Category::Caches => CacheId::all().iter().map(|c| c.name()).collect(),
            Category::CacheOps => CacheOp::all().iter().map(|c| c.name()).collect(),
            Category::CacheResults => CacheResult::all().iter().map(|c| c.name()).collect(),
        }
    }

    /// ABI code of a member name in this category
    pub fn code_of(&self, name: &str) -> Option<u64> {
        match self {
            Category::HwCounters => HwCounter::from_name(name).map(|c| c.code()),
            Category::SwCounters => SwCounter::from_name(name).map(|c| c.code()),
            Category::Caches => CacheId::from_name(name).map(|c| c.code()),
            Category::CacheOps => CacheOp::from_name(name).map(|c| c.code()),
            Category::CacheResults => CacheResult::from_name(name).map(|c| c.code()),
        }
    }

    /// ABI prefix that turns a member name into the kernel's constant name
    pub fn prefix(&self) -> &'static str {
        match self {
            Category::HwCounters => HwCounter::PREFIX,
            Category::SwCounters => SwCounter::PREFIX,
            Category::Caches => CacheId::PREFIX,
            Category::CacheOps => CacheOp::PREFIX,
            Category::CacheResults => CacheResult::PREFIX,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each list as it appears in the published header
    const LISTINGS: &[(&str, &[&str])] = &[
        (
            "PERF_HW_COUNTERS",
            &[
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
            ],
        ),
        (
            "PERF_SW_COUNTERS",
            &[
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
            ],
        ),
        (
            "PERF_CACHES",
            &[
                "L1D", "L1I", "LL", "DTLB", "ITLB", "BPU", "NODE", "L1D", "L1I", "LL", "DTLB",
                "ITLB", "BPU", "NODE",
            ],
        ),
        ("PERF_CACHE_OPS", &["READ", "WRITE", "PREFETCH"]),
        ("PERF_CACHE_RESULTS", &["ACCESS", "MISS"]),
    ];

    #[test]
    fn test_listings_are_verbatim() {
        let categories = Category::all();
        assert_eq!(categories.len(), LISTINGS.len());

        for (category, (name, members)) in categories.iter().zip(LISTINGS) {
            assert_eq!(category.name(), *name);
            assert_eq!(category.names(), *members, "{category}");
        }
    }

    #[test]
    fn test_distinct_counts() {
        let counts: Vec<usize> = Category::all()
            .iter()
            .map(|c| c.distinct_names().len())
            .collect();
        assert_eq!(counts, [10, 10, 7, 3, 2]);
        assert_eq!(Category::Caches.names().len(), 14);
    }

    #[test]
    fn test_codes_follow_first_occurrence() {
        for category in Category::all() {
            for (i, name) in category.distinct_names().iter().enumerate() {
                assert_eq!(category.code_of(name), Some(i as u64), "{category}/{name}");
            }
        }
        assert_eq!(Category::CacheOps.code_of("MISS"), None);
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(Category::from_name("perf_caches"), Some(Category::Caches));
        assert_eq!(Category::from_name("cache-op"), Some(Category::CacheOps));
        assert_eq!(Category::from_name("HW"), Some(Category::HwCounters));
        assert_eq!(Category::from_name("uncore"), None);
    }

    #[test]
    fn test_perf_types() {
        assert_eq!(Category::Caches.perf_type(), Some(PerfType::HwCache));
        assert_eq!(Category::CacheResults.perf_type(), None);
        assert_eq!(Category::SwCounters.prefix(), "PERF_COUNT_SW_");
    }
}
