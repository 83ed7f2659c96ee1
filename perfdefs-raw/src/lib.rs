//! # perfdefs-raw
//!
//! Name tables for Linux performance counters.
//!
//! Five lists make up the catalog: generalized hardware counters, software
//! counters, hardware caches, cache operations and cache results. Each list
//! is written once, as a [`counter_enum!`] invocation, and everything else
//! (typed enums, name and code lookup, listings) is generated from it.
//!
//! Members are numbered by position, which is also how the kernel numbers
//! them, so every name maps to its `perf_event_attr` code without a second
//! table.
//!
//! ## Usage
//!
//! ```
//! use perfdefs_raw::{CacheEvent, CacheId, CacheOp, CacheResult, Category, EventLayout, HwCounter};
//!
//! assert_eq!(HwCounter::CpuCycles.full_name(), "PERF_COUNT_HW_CPU_CYCLES");
//!
//! let event = CacheEvent::new(CacheId::Ll, CacheOp::Read, CacheResult::Miss);
//! assert_eq!(event.to_config(), 0x10002);
//!
//! assert_eq!(Category::Caches.names().len(), 14);
//! assert_eq!(Category::Caches.distinct_names().len(), 7);
//! ```

#[macro_use]
pub mod macros;

pub mod abi;
pub mod cache;
pub mod catalog;
pub mod counters;
pub mod error;

// Re-export for convenience
pub use abi::{EventLayout, PerfType, RawEvent};
pub use cache::{CacheEvent, CacheId, CacheOp, CacheResult, CACHE_LISTING};
pub use catalog::Category;
pub use counters::{HwCounter, SwCounter};
pub use error::{RawError, Result};
