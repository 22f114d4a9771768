//! Pattern extraction engine.
//!
//! A [`Rule`] is a named regular expression plus the capture groups it
//! exposes as fields. The `regex` crate has no lookaround, so the two pieces
//! of context the source conventions need are rule options instead:
//!
//! - a guard that can reject a candidate match (e.g. "not preceded by `.`", so
//!   `menu.action(` is not taken for a top-level `action(` call);
//! - a boundary pattern that ends the match right before the next recognised
//!   keyword, exposing the text in between as the `span` field.
//!
//! A rejected candidate resumes the search one character later, the way a
//! backtracking engine would retry.

pub mod rules;

use regex::{Captures, Regex};

/// Decides whether a candidate match at `captures` is really a match.
pub type Guard = fn(text: &str, captures: &Captures<'_>) -> bool;

pub struct Rule {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pattern: Regex,
    guard: Option<Guard>,
    span_until: Option<Regex>,
}

impl Rule {
    /// `pattern` must name a capture group for every entry of `fields`
    /// (except `span`, which is filled by [`Rule::span_until`]).
    pub fn new(name: &'static str, pattern: &str, fields: &'static [&'static str]) -> Self {
        let pattern = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("extraction rule `{name}` does not compile: {e}"));
        Self {
            name,
            fields,
            pattern,
            guard: None,
            span_until: None,
        }
    }

    pub fn guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Extends every match up to (not including) the next `boundary`, or to end of text.
    pub fn span_until(mut self, boundary: &str) -> Self {
        let name = self.name;
        self.span_until = Some(
            Regex::new(boundary)
                .unwrap_or_else(|e| panic!("boundary of rule `{name}` does not compile: {e}")),
        );
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn boundary(&self) -> Option<&str> {
        self.span_until.as_ref().map(Regex::as_str)
    }

    /// All matches in `text`, in order. Each call starts a fresh scan.
    pub fn matches<'r, 't>(&'r self, text: &'t str) -> Matches<'r, 't> {
        Matches {
            rule: self,
            text,
            position: 0,
        }
    }

    pub fn first<'t>(&self, text: &'t str) -> Option<Record<'t>> {
        self.matches(text).next()
    }

    /// Shorthand for the first match's `field`.
    pub fn capture<'t>(&self, text: &'t str, field: &str) -> Option<&'t str> {
        self.first(text).and_then(|record| record.get(field))
    }
}

/// Field values of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'t> {
    pub rule: &'static str,
    pub start: usize,
    pub end: usize,
    fields: Vec<(&'static str, &'t str)>,
}

impl<'t> Record<'t> {
    /// `None` when the field's group did not participate in the match.
    pub fn get(&self, field: &str) -> Option<&'t str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| *value)
    }

    /// Like [`Record::get`] but maps a non-participating group to `""`.
    pub fn text(&self, field: &str) -> &'t str {
        self.get(field).unwrap_or("")
    }
}

pub struct Matches<'r, 't> {
    rule: &'r Rule,
    text: &'t str,
    position: usize,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Record<'t>;

    fn next(&mut self) -> Option<Record<'t>> {
        while self.position <= self.text.len() {
            let captures = self.rule.pattern.captures_at(self.text, self.position)?;
            let whole = captures.get(0)?;

            if let Some(guard) = self.rule.guard {
                if !guard(self.text, &captures) {
                    self.position = next_boundary(self.text, whole.start());
                    continue;
                }
            }

            let mut fields: Vec<(&'static str, &'t str)> = self
                .rule
                .fields
                .iter()
                .filter_map(|&field| captures.name(field).map(|m| (field, m.as_str())))
                .collect();

            let mut end = whole.end();
            if let Some(boundary) = &self.rule.span_until {
                let span_end = boundary
                    .find_at(self.text, end)
                    .map_or(self.text.len(), |m| m.start());
                fields.push(("span", &self.text[end..span_end]));
                end = span_end;
            }

            self.position = if end > whole.start() {
                end
            } else {
                next_boundary(self.text, end)
            };

            return Some(Record {
                rule: self.rule.name,
                start: whole.start(),
                end,
                fields,
            });
        }
        None
    }
}

fn next_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map_or(from + 1, |c| from + c.len_utf8())
}

/// Guard: the match must not directly follow a `.` (member access).
pub fn not_member_access(text: &str, captures: &Captures<'_>) -> bool {
    captures
        .get(0)
        .map_or(true, |m| !text[..m.start()].ends_with('.'))
}

/// Every double-quoted literal in `text`, unquoted, in order.
pub fn string_literals(text: &str) -> Vec<String> {
    rules::STRING_LITERAL
        .matches(text)
        .map(|record| record.text("value").to_string())
        .collect()
}

/// Literals inside the first `rule` match's `list` field, or nothing.
pub fn keyed_strings(rule: &Rule, text: &str) -> Vec<String> {
    rule.capture(text, "list")
        .map(string_literals)
        .unwrap_or_default()
}
