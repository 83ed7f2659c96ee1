//! Hardware cache event tables
//!
//! A cache event is the triple (cache, operation, result), packed into
//! `perf_event_attr.config` as one byte per field:
//!
//! | Bits   | Field  |
//! |--------|--------|
//! | 0-7    | id     |
//! | 8-15   | op     |
//! | 16-23  | result |

use crate::abi::{cache, EventLayout, PerfType};
use crate::counter_enum;
use crate::error::{RawError, Result};

counter_enum! {
    /// Caches and cache-like structures (`PERF_CACHES`)
    pub enum CacheId: ("cache", "PERF_COUNT_HW_CACHE_") {
        /// L1 data cache
        L1d => ("L1D", cache::PERF_COUNT_HW_CACHE_L1D),
        /// L1 instruction cache
        L1i => ("L1I", cache::PERF_COUNT_HW_CACHE_L1I),
        /// Last-level cache
        Ll => ("LL", cache::PERF_COUNT_HW_CACHE_LL),
        /// Data TLB
        Dtlb => ("DTLB", cache::PERF_COUNT_HW_CACHE_DTLB),
        /// Instruction TLB
        Itlb => ("ITLB", cache::PERF_COUNT_HW_CACHE_ITLB),
        /// Branch prediction unit
        Bpu => ("BPU", cache::PERF_COUNT_HW_CACHE_BPU),
        /// Local NUMA node memory
        Node => ("NODE", cache::PERF_COUNT_HW_CACHE_NODE),
    }
}

counter_enum! {
    /// Cache operations (`PERF_CACHE_OPS`)
    pub enum CacheOp: ("cache operation", "PERF_COUNT_HW_CACHE_OP_") {
        Read => ("READ", cache::PERF_COUNT_HW_CACHE_OP_READ),
        Write => ("WRITE", cache::PERF_COUNT_HW_CACHE_OP_WRITE),
        Prefetch => ("PREFETCH", cache::PERF_COUNT_HW_CACHE_OP_PREFETCH),
    }
}

counter_enum! {
    /// Cache operation results (`PERF_CACHE_RESULTS`)
    pub enum CacheResult: ("cache result", "PERF_COUNT_HW_CACHE_RESULT_") {
        Access => ("ACCESS", cache::PERF_COUNT_HW_CACHE_RESULT_ACCESS),
        Miss => ("MISS", cache::PERF_COUNT_HW_CACHE_RESULT_MISS),
    }
}

/// The `PERF_CACHES` list exactly as published: the seven caches, twice.
///
/// Only listings use this. Typed lookups go through [`CacheId`], which
/// holds each cache once.
pub const CACHE_LISTING: [CacheId; 14] = [
    CacheId::L1d,
    CacheId::L1i,
    CacheId::Ll,
    CacheId::Dtlb,
    CacheId::Itlb,
    CacheId::Bpu,
    CacheId::Node,
    CacheId::L1d,
    CacheId::L1i,
    CacheId::Ll,
    CacheId::Dtlb,
    CacheId::Itlb,
    CacheId::Bpu,
    CacheId::Node,
];

/// A hardware cache event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheEvent {
    pub id: CacheId,
    pub op: CacheOp,
    pub result: CacheResult,
}

impl CacheEvent {
    pub fn new(id: CacheId, op: CacheOp, result: CacheResult) -> Self {
        Self { id, op, result }
    }

    /// Every combination, ordered by cache, then operation, then result
    pub fn all() -> Vec<CacheEvent> {
        let mut events = Vec::with_capacity(CacheId::COUNT * CacheOp::COUNT * CacheResult::COUNT);
        for id in CacheId::all() {
            for op in CacheOp::all() {
                for result in CacheResult::all() {
                    events.push(Self::new(id, op, result));
                }
            }
        }
        events
    }

    /// Canonical name, e.g. `PERF_COUNT_HW_CACHE_L1D_READ_MISS`
    pub fn full_name(&self) -> String {
        format!("{}{}", CacheId::PREFIX, self)
    }

    /// Parse `ID_OP_RESULT` or `ID:OP:RESULT`, with or without the
    /// `PERF_COUNT_HW_CACHE_` prefix. None of the member names contain a
    /// separator, so the split is unambiguous.
    pub fn from_name(name: &str) -> Option<CacheEvent> {
        let name = name.trim();
        let bare = match name.get(..CacheId::PREFIX.len()) {
            Some(head) if head.eq_ignore_ascii_case(CacheId::PREFIX) => &name[CacheId::PREFIX.len()..],
            _ => name,
        };

        let mut parts = bare.split(|c| c == '_' || c == ':');
        let id = CacheId::from_name(parts.next()?)?;
        let op = CacheOp::from_name(parts.next()?)?;
        let result = CacheResult::from_name(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(id, op, result))
    }
}

impl std::fmt::Display for CacheEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}_{}", self.id, self.op, self.result)
    }
}

impl std::str::FromStr for CacheEvent {
    type Err = RawError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| RawError::UnknownName {
            category: "cache event",
            name: s.to_string(),
        })
    }
}

impl EventLayout for CacheEvent {
    const PERF_TYPE: PerfType = PerfType::HwCache;

    fn to_config(&self) -> u64 {
        self.id.code()
            | (self.op.code() << cache::OP_SHIFT)
            | (self.result.code() << cache::RESULT_SHIFT)
    }

    fn from_config(config: u64) -> Result<Self> {
        let invalid = RawError::InvalidConfig {
            perf_type: Self::PERF_TYPE.id(),
            config,
        };

        if config >> (cache::RESULT_SHIFT + 8) != 0 {
            return Err(invalid);
        }

        let id = CacheId::from_code(config & cache::FIELD_MASK);
        let op = CacheOp::from_code((config >> cache::OP_SHIFT) & cache::FIELD_MASK);
        let result = CacheResult::from_code((config >> cache::RESULT_SHIFT) & cache::FIELD_MASK);

        match (id, op, result) {
            (Some(id), Some(op), Some(result)) => Ok(Self::new(id, op, result)),
            _ => Err(invalid),
        }
    }
}
