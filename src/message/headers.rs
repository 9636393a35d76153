//! Ordered, multi-valued header container.
//!
//! # Responsibilities
//! - Store every (name, value) pair a message carries, duplicates included
//! - Answer lookups by name with all values in insertion order
//! - Iterate one entry per stored value
//!
//! # Design Decisions
//! - Pairs live in a single `Vec` so insertion order is total, not per name
//! - Names keep the casing they were added with; lookups compare ASCII
//!   case-insensitively, as HTTP field names do
//! - No validation of names or values; the host transport owns HTTP syntax

/// Ordered multimap of header name to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value for `name`, keeping any values already stored.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replace every value of `name` with a single value.
    ///
    /// The new pair takes the position of the first existing value, or goes
    /// to the end if `name` was not present.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => {
                let mut current = 0usize;
                self.entries.retain(|(n, _)| {
                    let keep = current <= index || !n.eq_ignore_ascii_case(&name);
                    current += 1;
                    keep
                });
                self.entries[index] = (name, value);
            }
            None => self.entries.push((name, value)),
        }
    }

    /// All values stored for `name`, in insertion order.
    pub fn get(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// First value stored for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Remove every value of `name`, returning how many were dropped.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        before - self.entries.len()
    }

    /// Distinct header names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for (name, _) in &self.entries {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                names.push(name);
            }
        }
        names
    }

    /// One `(name, value)` pair per stored value.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of stored values (not distinct names).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_keep_insertion_order() {
        let mut headers = Headers::new();
        headers.add("Accept", "text/html");
        headers.add("X-Trace", "t1");
        headers.add("X-Trace", "t2");

        assert_eq!(headers.get("X-Trace"), vec!["t1", "t2"]);
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.names(), vec!["Accept", "X-Trace"]);
    }

    #[test]
    fn lookup_ignores_case() {
        let mut headers = Headers::new();
        headers.add("Content-Type", "text/plain");
        assert_eq!(headers.first("content-type"), Some("text/plain"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert!(headers.get("missing").is_empty());
    }

    #[test]
    fn entries_yield_one_pair_per_value() {
        let mut headers = Headers::new();
        headers.add("A", "1");
        headers.add("B", "2");
        headers.add("A", "3");

        let entries: Vec<_> = headers.entries().collect();
        assert_eq!(entries, vec![("A", "1"), ("B", "2"), ("A", "3")]);
    }

    #[test]
    fn set_collapses_to_single_value_at_first_position() {
        let mut headers = Headers::new();
        headers.add("A", "1");
        headers.add("B", "2");
        headers.add("a", "3");
        headers.set("A", "new");

        let entries: Vec<_> = headers.entries().collect();
        assert_eq!(entries, vec![("A", "new"), ("B", "2")]);

        headers.set("C", "4");
        assert_eq!(headers.first("C"), Some("4"));
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn remove_drops_every_value() {
        let mut headers = Headers::new();
        headers.add("X", "1");
        headers.add("x", "2");
        headers.add("Y", "3");

        assert_eq!(headers.remove("X"), 2);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.remove("X"), 0);
    }
}
