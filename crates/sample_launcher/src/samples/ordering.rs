//! Priority-then-alphabetical ordering for tab titles and filter tags

use std::cmp::Ordering;

/// Orders keys by a preferred list, then lexicographically
///
/// Keys found in the priority list come first, in list order. Keys not in
/// the list follow, sorted alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityOrder {
    priority: Vec<String>,
}

impl PriorityOrder {
    /// Create an ordering from a preferred key sequence
    pub fn new<I, S>(priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            priority: priority.into_iter().map(Into::into).collect(),
        }
    }

    /// The preferred key sequence
    pub fn priority(&self) -> &[String] {
        &self.priority
    }

    fn rank(&self, key: &str) -> Option<usize> {
        self.priority.iter().position(|p| p == key)
    }

    /// Compare two keys
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        match (self.rank(a), self.rank(b)) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        }
    }

    /// Sort keys in place
    pub fn sort(&self, keys: &mut [String]) {
        keys.sort_by(|a, b| self.compare(a, b));
    }

    /// Sort a set of keys into a new vector
    pub fn sorted<'a, I>(&self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out: Vec<String> = keys.into_iter().cloned().collect();
        self.sort(&mut out);
        out
    }
}
