//! Specialized collection types

use std::collections::HashMap;

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a sample stored inside an index
    pub struct SampleKey;
}

/// Handle-based storage for samples
pub type SampleSlots<T> = SlotMap<SampleKey, T>;

/// String-keyed buckets of handles, insertion order preserved per bucket
#[derive(Debug, Clone, Default)]
pub struct Buckets {
    buckets: HashMap<String, Vec<SampleKey>>,
}

impl Buckets {
    /// Create an empty bucket map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handle to the bucket for `key`, creating it on first use
    pub fn push(&mut self, key: &str, handle: SampleKey) {
        self.buckets.entry(key.to_string()).or_default().push(handle);
    }

    /// Remove a handle from the bucket for `key`
    ///
    /// Buckets left empty are dropped so that `keys` only reports live keys.
    pub fn remove(&mut self, key: &str, handle: SampleKey) {
        if let Some(bucket) = self.buckets.get_mut(key) {
            bucket.retain(|h| *h != handle);
            if bucket.is_empty() {
                self.buckets.remove(key);
            }
        }
    }

    /// Handles in the bucket for `key`; empty when the key is unknown
    pub fn get(&self, key: &str) -> &[SampleKey] {
        self.buckets.get(key).map_or(&[], Vec::as_slice)
    }

    /// All bucket keys, in no particular order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.buckets.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut slots: SampleSlots<u32> = SlotMap::with_key();
        let a = slots.insert(1);
        let b = slots.insert(2);

        let mut buckets = Buckets::new();
        buckets.push("api", b);
        buckets.push("api", a);

        assert_eq!(buckets.get("api"), &[b, a]);
        assert!(buckets.get("unknown").is_empty());
    }

    #[test]
    fn test_remove_drops_empty_bucket() {
        let mut slots: SampleSlots<u32> = SlotMap::with_key();
        let a = slots.insert(1);

        let mut buckets = Buckets::new();
        buckets.push("api", a);
        buckets.remove("api", a);

        assert_eq!(buckets.keys().count(), 0);
    }
}
