//! Text and JSON rendering of catalog listings and resolved counters
//!
//! Every row is built from the counter tables in `perfdefs-raw`, so the
//! listings never drift from the enums.

use serde::Serialize;

use perfdefs_raw::{CacheEvent, Category, EventLayout, PerfType};

use crate::counters::{perf_cache_alias, CounterSet};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rows that have a plain-text form
pub trait TextRow {
    fn text_row(&self) -> String;
}

/// One member of a name list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub category: &'static str,
    pub position: usize,
    pub name: String,
    pub full_name: String,
    /// `None` for cache operations and results, which are not events alone
    pub perf_type: Option<&'static str>,
    pub code: u64,
}

impl TextRow for CatalogEntry {
    fn text_row(&self) -> String {
        format!(
            "{:<18} {:>2}  {:<40} {:<18} 0x{:x}",
            self.category,
            self.position,
            self.full_name,
            self.perf_type.unwrap_or("-"),
            self.code
        )
    }
}

/// One counter of a resolved counter set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCounter {
    pub set: usize,
    pub name: String,
    pub perf_type: &'static str,
    pub type_id: u32,
    pub config: u64,
}

impl TextRow for ResolvedCounter {
    fn text_row(&self) -> String {
        format!(
            "set {:<3} {:<40} type={} config=0x{:x}",
            self.set, self.name, self.type_id, self.config
        )
    }
}

/// Entries for a category, verbatim or with duplicates dropped
pub fn catalog_entries(category: Category, distinct: bool) -> Vec<CatalogEntry> {
    let names = if distinct {
        category.distinct_names()
    } else {
        category.names()
    };
    let perf_type = category.perf_type().map(|t| t.full_name());

    names
        .into_iter()
        .enumerate()
        .filter_map(|(position, name)| {
            let code = category.code_of(name)?;
            Some(CatalogEntry {
                category: category.name(),
                position,
                name: name.to_string(),
                full_name: format!("{}{}", category.prefix(), name),
                perf_type,
                code,
            })
        })
        .collect()
}

/// Entries for every composite cache event; `code` is the encoded config
pub fn cache_event_entries() -> Vec<CatalogEntry> {
    CacheEvent::all()
        .into_iter()
        .enumerate()
        .map(|(position, event)| CatalogEntry {
            category: Category::Caches.name(),
            position,
            name: perf_cache_alias(&event),
            full_name: event.full_name(),
            perf_type: Some(PerfType::HwCache.full_name()),
            code: event.to_config(),
        })
        .collect()
}

pub fn resolved_entries(sets: &[CounterSet]) -> Vec<ResolvedCounter> {
    sets.iter()
        .enumerate()
        .flat_map(|(index, set)| {
            set.iter().map(move |counter| {
                let event = counter.raw_event();
                ResolvedCounter {
                    set: index,
                    name: counter.name(),
                    perf_type: event.perf_type.full_name(),
                    type_id: event.perf_type.id(),
                    config: event.config,
                }
            })
        })
        .collect()
}

pub fn render<T: Serialize + TextRow>(rows: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&row.text_row());
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(rows)?;
            out.push('\n');
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::parse_counter_sets;

    #[test]
    fn test_verbatim_cache_entries() {
        let entries = catalog_entries(Category::Caches, false);
        assert_eq!(entries.len(), 14);
        assert_eq!(entries[7].name, "L1D");
        assert_eq!(entries[7].position, 7);
        // Duplicates keep the code of the first occurrence
        assert_eq!(entries[7].code, 0);
        assert_eq!(entries[13].full_name, "PERF_COUNT_HW_CACHE_NODE");

        assert_eq!(catalog_entries(Category::Caches, true).len(), 7);
    }

    #[test]
    fn test_sub_field_entries_have_no_perf_type() {
        let entries = catalog_entries(Category::CacheResults, false);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].full_name, "PERF_COUNT_HW_CACHE_RESULT_MISS");
        assert_eq!(entries[1].perf_type, None);
        assert_eq!(entries[1].code, 1);
    }

    #[test]
    fn test_cache_event_entries() {
        let entries = cache_event_entries();
        assert_eq!(entries.len(), 42);
        assert_eq!(entries[1].name, "L1-dcache-load-misses");
        assert_eq!(entries[1].full_name, "PERF_COUNT_HW_CACHE_L1D_READ_MISS");
        assert_eq!(entries[1].code, 0x10000);
    }

    #[test]
    fn test_text_rendering() {
        let entries = catalog_entries(Category::HwCounters, false);
        let text = render(&entries, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("PERF_HW_COUNTERS"));
        assert!(lines[0].contains("PERF_COUNT_HW_CPU_CYCLES"));
        assert!(lines[9].contains("PERF_COUNT_HW_REF_CPU_CYCLES"));
        assert!(lines[9].ends_with("0x9"));
    }

    #[test]
    fn test_json_rendering() {
        let entries = catalog_entries(Category::CacheOps, false);
        let json = render(&entries, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2]["name"], "PREFETCH");
        assert_eq!(rows[2]["code"], 2);
        assert!(rows[2]["perf_type"].is_null());
    }

    #[test]
    fn test_resolved_entries() {
        let sets = parse_counter_sets(&["cycles,LLC-load-misses", "task-clock"]).unwrap();
        let rows = resolved_entries(&sets);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].set, 0);
        assert_eq!(rows[1].name, "PERF_COUNT_HW_CACHE_LL_READ_MISS");
        assert_eq!(rows[1].type_id, 3);
        assert_eq!(rows[1].config, 0x10002);
        assert_eq!(rows[2].set, 1);
        assert_eq!(rows[2].perf_type, "PERF_TYPE_SOFTWARE");

        let text = render(&rows, OutputFormat::Text).unwrap();
        assert!(text.contains("type=1 config=0x1"));
    }
}
