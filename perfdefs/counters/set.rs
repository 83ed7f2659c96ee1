// Counter sets: the counters to be measured together in one invocation

use crate::counters::events::Counter;
use crate::error::Result;

/// Ordered, duplicate-free group of counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterSet {
    counters: Vec<Counter>,
}

impl CounterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a counter, keeping the first occurrence of duplicates.
    /// Returns whether the counter was added.
    pub fn push(&mut self, counter: Counter) -> bool {
        if self.counters.contains(&counter) {
            tracing::warn!("Dropping duplicate counter {} from set", counter);
            return false;
        }
        self.counters.push(counter);
        true
    }

    /// Resolve every name into one set
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut set = Self::new();
        for name in names {
            set.push(Counter::from_name(name.as_ref())?);
        }
        Ok(set)
    }

    /// Parse a comma-separated list like `cycles,instructions`
    pub fn parse(spec: &str) -> Result<Self> {
        let names: Vec<&str> = spec
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        Self::from_names(&names)
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Counter> {
        self.counters.iter()
    }
}

impl<'a> IntoIterator for &'a CounterSet {
    type Item = &'a Counter;
    type IntoIter = std::slice::Iter<'a, Counter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for CounterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.counters.iter().map(|c| c.name()).collect();
        f.write_str(&names.join(","))
    }
}

/// How counters were requested
///
/// A flat list of names is one set measured together. A list of lists asks
/// for one invocation per inner list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterSpec {
    Flat(Vec<String>),
    Nested(Vec<Vec<String>>),
}

/// Turn a request into the counter sets to measure, one per invocation.
/// Empty sets are skipped.
pub fn normalize_counter_sets(spec: &CounterSpec) -> Result<Vec<CounterSet>> {
    let groups: Vec<&[String]> = match spec {
        CounterSpec::Flat(names) => vec![names.as_slice()],
        CounterSpec::Nested(groups) => groups.iter().map(Vec::as_slice).collect(),
    };

    let mut sets = Vec::new();
    for group in groups {
        let set = CounterSet::from_names(group)?;
        if set.is_empty() {
            continue;
        }
        sets.push(set);
    }

    tracing::debug!("Normalized counter request into {} set(s)", sets.len());
    Ok(sets)
}

/// Parse command-line style arguments: each argument is one set, commas
/// separate the counters inside it
pub fn parse_counter_sets<S: AsRef<str>>(args: &[S]) -> Result<Vec<CounterSet>> {
    let groups: Vec<Vec<String>> = args
        .iter()
        .map(|arg| {
            arg.as_ref()
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect()
        })
        .collect();
    normalize_counter_sets(&CounterSpec::Nested(groups))
}
