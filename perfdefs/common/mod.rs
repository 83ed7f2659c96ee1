pub mod paranoid;

pub use paranoid::{
    are_perf_counters_available, ParanoidLevel, PerfAvailability, PERF_EVENT_PARANOID_PATH,
};
