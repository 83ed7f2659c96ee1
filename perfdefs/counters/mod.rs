pub mod events;
pub mod set;

pub use events::{perf_cache_alias, Counter, ALIASES};
pub use set::{normalize_counter_sets, parse_counter_sets, CounterSet, CounterSpec};
