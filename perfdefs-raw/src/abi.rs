//! Linux `perf_event` ABI codes and typed event configuration
//!
//! The numeric values come from `include/uapi/linux/perf_event.h`. Within
//! every enumeration the kernel numbers members by position, so the codes
//! below are also the source order of the name lists.
//!
//! ## References
//!
//! - `perf_event_open(2)`, the `type` and `config` fields of `perf_event_attr`

use crate::counter_enum;
use crate::error::{RawError, Result};

/// `perf_event_attr.type` values
pub mod types {
    pub const PERF_TYPE_HARDWARE: u32 = 0;
    pub const PERF_TYPE_SOFTWARE: u32 = 1;
    pub const PERF_TYPE_TRACEPOINT: u32 = 2;
    pub const PERF_TYPE_HW_CACHE: u32 = 3;
    pub const PERF_TYPE_RAW: u32 = 4;
    pub const PERF_TYPE_BREAKPOINT: u32 = 5;
}

/// Generalized hardware events (`enum perf_hw_id`)
pub mod hw {
    pub const PERF_COUNT_HW_CPU_CYCLES: u64 = 0;
    pub const PERF_COUNT_HW_INSTRUCTIONS: u64 = 1;
    pub const PERF_COUNT_HW_CACHE_REFERENCES: u64 = 2;
    pub const PERF_COUNT_HW_CACHE_MISSES: u64 = 3;
    pub const PERF_COUNT_HW_BRANCH_INSTRUCTIONS: u64 = 4;
    pub const PERF_COUNT_HW_BRANCH_MISSES: u64 = 5;
    pub const PERF_COUNT_HW_BUS_CYCLES: u64 = 6;
    pub const PERF_COUNT_HW_STALLED_CYCLES_FRONTEND: u64 = 7;
    pub const PERF_COUNT_HW_STALLED_CYCLES_BACKEND: u64 = 8;
    pub const PERF_COUNT_HW_REF_CPU_CYCLES: u64 = 9;
}

/// Software events (`enum perf_sw_ids`)
pub mod sw {
    pub const PERF_COUNT_SW_CPU_CLOCK: u64 = 0;
    pub const PERF_COUNT_SW_TASK_CLOCK: u64 = 1;
    pub const PERF_COUNT_SW_PAGE_FAULTS: u64 = 2;
    pub const PERF_COUNT_SW_CONTEXT_SWITCHES: u64 = 3;
    pub const PERF_COUNT_SW_CPU_MIGRATIONS: u64 = 4;
    pub const PERF_COUNT_SW_PAGE_FAULTS_MIN: u64 = 5;
    pub const PERF_COUNT_SW_PAGE_FAULTS_MAJ: u64 = 6;
    pub const PERF_COUNT_SW_ALIGNMENT_FAULTS: u64 = 7;
    pub const PERF_COUNT_SW_EMULATION_FAULTS: u64 = 8;
    pub const PERF_COUNT_SW_DUMMY: u64 = 9;
}

/// Hardware cache event fields (`enum perf_hw_cache_id`, `_op_id`, `_op_result_id`)
pub mod cache {
    pub const PERF_COUNT_HW_CACHE_L1D: u64 = 0;
    pub const PERF_COUNT_HW_CACHE_L1I: u64 = 1;
    pub const PERF_COUNT_HW_CACHE_LL: u64 = 2;
    pub const PERF_COUNT_HW_CACHE_DTLB: u64 = 3;
    pub const PERF_COUNT_HW_CACHE_ITLB: u64 = 4;
    pub const PERF_COUNT_HW_CACHE_BPU: u64 = 5;
    pub const PERF_COUNT_HW_CACHE_NODE: u64 = 6;

    pub const PERF_COUNT_HW_CACHE_OP_READ: u64 = 0;
    pub const PERF_COUNT_HW_CACHE_OP_WRITE: u64 = 1;
    pub const PERF_COUNT_HW_CACHE_OP_PREFETCH: u64 = 2;

    pub const PERF_COUNT_HW_CACHE_RESULT_ACCESS: u64 = 0;
    pub const PERF_COUNT_HW_CACHE_RESULT_MISS: u64 = 1;

    /// Bit offsets of the op and result fields inside `config`
    pub const OP_SHIFT: u32 = 8;
    pub const RESULT_SHIFT: u32 = 16;
    /// Each field occupies one byte
    pub const FIELD_MASK: u64 = 0xFF;
}

counter_enum! {
    /// Event types a counter name can resolve to
    pub enum PerfType: ("perf type", "PERF_TYPE_") {
        Hardware => ("HARDWARE", types::PERF_TYPE_HARDWARE as u64),
        Software => ("SOFTWARE", types::PERF_TYPE_SOFTWARE as u64),
        HwCache => ("HW_CACHE", types::PERF_TYPE_HW_CACHE as u64),
    }
}

impl PerfType {
    /// Value for `perf_event_attr.type`
    pub fn id(&self) -> u32 {
        self.code() as u32
    }
}

/// Trait for typed events that map to a `perf_event_attr.config` value
///
/// # Example
///
/// ```
/// use perfdefs_raw::{EventLayout, HwCounter, PerfType};
///
/// let event = HwCounter::BranchMisses.to_raw_event();
/// assert_eq!(event.perf_type, PerfType::Hardware);
/// assert_eq!(event.config, 5);
/// assert_eq!(event.decode::<HwCounter>().unwrap(), HwCounter::BranchMisses);
/// ```
pub trait EventLayout: Sized {
    /// The `perf_event_attr.type` this layout belongs to
    const PERF_TYPE: PerfType;

    /// Encode this event as a `config` value
    fn to_config(&self) -> u64;

    /// Decode a `config` value, rejecting unknown or malformed values
    fn from_config(config: u64) -> Result<Self>;

    fn to_raw_event(&self) -> RawEvent {
        RawEvent::new(Self::PERF_TYPE, self.to_config())
    }
}

/// A `(type, config)` pair as passed to `perf_event_open`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawEvent {
    pub perf_type: PerfType,
    pub config: u64,
}

impl RawEvent {
    pub fn new(perf_type: PerfType, config: u64) -> Self {
        Self { perf_type, config }
    }

    /// Decode into a typed layout, checking the event type first
    pub fn decode<T: EventLayout>(&self) -> Result<T> {
        if self.perf_type != T::PERF_TYPE {
            return Err(RawError::InvalidConfig {
                perf_type: self.perf_type.id(),
                config: self.config,
            });
        }
        T::from_config(self.config)
    }
}

impl std::fmt::Display for RawEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "type={},config=0x{:x}", self.perf_type.id(), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_type_ids() {
        assert_eq!(PerfType::Hardware.id(), types::PERF_TYPE_HARDWARE);
        assert_eq!(PerfType::Software.id(), types::PERF_TYPE_SOFTWARE);
        assert_eq!(PerfType::HwCache.id(), types::PERF_TYPE_HW_CACHE);
        assert_eq!(PerfType::HwCache.full_name(), "PERF_TYPE_HW_CACHE");
        assert_eq!(PerfType::from_code(3), Some(PerfType::HwCache));
        assert_eq!(PerfType::from_code(types::PERF_TYPE_RAW as u64), None);
    }

    #[test]
    fn test_raw_event_display() {
        let event = RawEvent::new(PerfType::HwCache, 0x10102);
        assert_eq!(event.to_string(), "type=3,config=0x10102");
    }
}
