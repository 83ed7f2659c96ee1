pub mod common;
pub mod config;
pub mod counters;
pub mod error;
pub mod render;

pub use config::PerfConfig;
pub use counters::{Counter, CounterSet};
pub use error::{PerfdefsError, Result};

// Re-export the tables so users need a single dependency
pub use perfdefs_raw::{
    CacheEvent, CacheId, CacheOp, CacheResult, Category, EventLayout, HwCounter, PerfType,
    RawEvent, SwCounter,
};
