//! Diagnostics collected during a run.
//!
//! Extraction problems never abort processing of sibling entities. Each one is
//! recorded here (and mirrored to `tracing`), and the run decides once, at the
//! very end, whether it failed by asking [`Diagnostics::has_errors`].

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        })
    }
}

/// One problem, tied to the entity id or file name it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.subject, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Info, subject.into(), message.into());
    }

    pub fn warn(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Warn, subject.into(), message.into());
    }

    pub fn error(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        self.push(Severity::Error, subject.into(), message.into());
    }

    fn push(&mut self, severity: Severity, subject: String, message: String) {
        match severity {
            Severity::Info => info!(subject = %subject, "{message}"),
            Severity::Warn => warn!(subject = %subject, "{message}"),
            Severity::Error => error!(subject = %subject, "{message}"),
        }
        self.entries.push(Diagnostic {
            severity,
            subject,
            message,
        });
    }

    /// Appends `other` without re-emitting its entries to the log.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries.iter().filter(|d| d.severity == severity).count()
    }

    pub fn for_subject<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.subject == subject)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Insertion-ordered map that reports duplicate keys instead of silently
/// replacing them. The later value still wins.
#[derive(Debug)]
pub struct Accumulator<K, V> {
    index: BTreeMap<K, usize>,
    entries: Vec<(K, String, V)>,
}

impl<K, V> Default for Accumulator<K, V> {
    fn default() -> Self {
        Self {
            index: BTreeMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Ord + Clone + fmt::Display, V> Accumulator<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `origin` names where the value came from (a file name) for the collision report.
    pub fn insert(&mut self, key: K, origin: &str, value: V, diagnostics: &mut Diagnostics) {
        match self.index.get(&key) {
            Some(&position) => {
                let previous = &self.entries[position].1;
                diagnostics.warn(
                    key.to_string(),
                    format!("duplicate key: `{previous}` overridden by `{origin}`"),
                );
                self.entries[position] = (key, origin.to_string(), value);
            }
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, origin.to_string(), value));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].2)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Values in first-insertion order.
    pub fn into_values(self) -> Vec<V> {
        self.entries.into_iter().map(|(_, _, value)| value).collect()
    }

    pub fn into_map(self) -> BTreeMap<K, V> {
        self.entries
            .into_iter()
            .map(|(key, _, value)| (key, value))
            .collect()
    }
}
