//! Sample index: category and tag views over the native sample list
//!
//! The index is built once from the samples reported by the native library
//! and is read-mostly afterwards. Bucket contents never change after
//! [`SampleIndex::build`]; the only mutable state is the active tag filter,
//! which is replaced wholesale by [`SampleIndex::apply_filter`].
//!
//! Every lookup degrades to an empty result instead of failing, so an
//! unknown category or tag simply renders as an empty list.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::foundation::collections::{Buckets, SampleKey, SampleSlots, SlotMap};

use super::ordering::PriorityOrder;
use super::sample::{Sample, ANY_TAG};

/// Category name that matches every category in batch selection
pub const ALL_CATEGORIES: &str = "all";

/// Authoritative collection of samples with category and tag lookups
#[derive(Debug, Clone)]
pub struct SampleIndex {
    /// Sample storage
    slots: SampleSlots<Sample>,

    /// Unique samples in insertion order
    order: Vec<SampleKey>,

    /// id -> handle
    by_id: HashMap<String, SampleKey>,

    /// category -> handles
    by_category: Buckets,

    /// tag -> handles
    by_tag: Buckets,

    /// Distinct categories, sorted
    categories: Vec<String>,

    /// Distinct tags, sorted
    tags: Vec<String>,

    /// Committed tag filter
    active_filter: BTreeSet<String>,
}

impl SampleIndex {
    /// Build an index from the native sample list
    ///
    /// `None` entries and entries with an empty id are skipped. When two
    /// entries share an id the later one wins: the earlier sample is removed
    /// from every bucket before the later one is inserted.
    ///
    /// The active filter starts as the full discovered tag set.
    pub fn build<I, T>(samples: I, category_order: &PriorityOrder, tag_order: &PriorityOrder) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Sample>>,
    {
        let mut index = Self {
            slots: SlotMap::with_key(),
            order: Vec::new(),
            by_id: HashMap::new(),
            by_category: Buckets::new(),
            by_tag: Buckets::new(),
            categories: Vec::new(),
            tags: Vec::new(),
            active_filter: BTreeSet::new(),
        };

        let mut skipped = 0usize;
        let mut replaced = 0usize;

        for entry in samples {
            let entry: Option<Sample> = entry.into();
            let Some(mut sample) = entry else {
                skipped += 1;
                continue;
            };
            if sample.id().is_empty() {
                skipped += 1;
                continue;
            }
            sample.normalize();

            if index.remove_existing(sample.id()) {
                replaced += 1;
            }
            index.insert(sample);
        }

        index.categories = category_order.sorted(index.by_category.keys());
        index.tags = tag_order.sorted(index.by_tag.keys());
        index.active_filter = index.all_tags_filter();

        if skipped > 0 {
            log::warn!("Skipped {skipped} invalid sample entries");
        }
        if replaced > 0 {
            log::warn!("{replaced} duplicate sample ids replaced an earlier entry");
        }
        log::debug!(
            "Indexed {} samples across {} categories and {} tags",
            index.order.len(),
            index.categories.len(),
            index.tags.len()
        );

        index
    }

    /// Build an empty index
    pub fn empty() -> Self {
        Self::build(Vec::<Sample>::new(), &PriorityOrder::default(), &PriorityOrder::default())
    }

    fn insert(&mut self, sample: Sample) {
        let id = sample.id().to_string();
        let category = sample.category().to_string();
        let tags: Vec<String> = sample.tags().to_vec();

        let key = self.slots.insert(sample);
        self.order.push(key);
        self.by_id.insert(id, key);
        self.by_category.push(&category, key);

        let mut seen = HashSet::new();
        for tag in &tags {
            // A tag listed twice on one sample still yields one bucket entry
            if seen.insert(tag.as_str()) {
                self.by_tag.push(tag, key);
            }
        }
    }

    fn remove_existing(&mut self, id: &str) -> bool {
        let Some(key) = self.by_id.remove(id) else {
            return false;
        };
        if let Some(old) = self.slots.remove(key) {
            self.by_category.remove(old.category(), key);
            for tag in old.tags() {
                self.by_tag.remove(tag, key);
            }
        }
        self.order.retain(|k| *k != key);
        true
    }

    fn resolve<'a>(&'a self, keys: &'a [SampleKey]) -> impl Iterator<Item = &'a Sample> + 'a {
        keys.iter().filter_map(|key| self.slots.get(*key))
    }

    /// Number of unique samples
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the index holds no samples
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Unique samples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.resolve(&self.order)
    }

    /// Look up a sample by id
    pub fn find_by_id(&self, id: &str) -> Option<&Sample> {
        self.by_id.get(id).and_then(|key| self.slots.get(*key))
    }

    /// Distinct categories, priority first then alphabetical
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct tags, priority first then alphabetical
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Samples in `category`, insertion order; empty for unknown categories
    pub fn by_category(&self, category: &str) -> Vec<&Sample> {
        self.resolve(self.by_category.get(category)).collect()
    }

    /// Samples carrying `tag`, insertion order; empty for unknown tags
    pub fn by_tag(&self, tag: &str) -> Vec<&Sample> {
        self.resolve(self.by_tag.get(tag)).collect()
    }

    /// Union of [`SampleIndex::by_tag`] over `tags`
    ///
    /// Each sample appears once, in index insertion order. An empty tag set
    /// yields an empty result.
    pub fn by_tags<'a, I>(&self, tags: I) -> Vec<&Sample>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let keys = self.matching_keys(tags);
        if keys.is_empty() {
            return Vec::new();
        }
        self.order
            .iter()
            .filter(|key| keys.contains(*key))
            .filter_map(|key| self.slots.get(*key))
            .collect()
    }

    fn matching_keys<'a, I>(&self, tags: I) -> HashSet<SampleKey>
    where
        I: IntoIterator<Item = &'a String>,
    {
        tags.into_iter()
            .flat_map(|tag| self.by_tag.get(tag).iter().copied())
            .collect()
    }

    /// Replace the active filter
    ///
    /// Bucket contents are untouched. An empty set hides every sample.
    pub fn apply_filter<I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.active_filter = tags.into_iter().collect();
        log::debug!("Applied tag filter: {:?}", self.active_filter);
    }

    /// The committed tag filter
    pub fn active_filter(&self) -> &BTreeSet<String> {
        &self.active_filter
    }

    /// The full discovered tag set, used to seed the filter at startup
    pub fn all_tags_filter(&self) -> BTreeSet<String> {
        self.tags.iter().cloned().collect()
    }

    /// Samples in `category` that pass the active filter
    ///
    /// Computed from the fixed buckets on every call.
    pub fn viewable(&self, category: &str) -> Vec<&Sample> {
        let keys = self.matching_keys(self.active_filter.iter());
        self.by_category
            .get(category)
            .iter()
            .filter(|key| keys.contains(*key))
            .filter_map(|key| self.slots.get(*key))
            .collect()
    }

    /// Samples selected for a batch run
    ///
    /// [`ALL_CATEGORIES`] matches every category. An empty tag list matches
    /// every tag, as does the sentinel tag paired with [`ALL_CATEGORIES`];
    /// otherwise a sample matches when it carries any listed tag, the
    /// sentinel included.
    pub fn batch_selection(&self, category: &str, tags: &[String]) -> Vec<&Sample> {
        let any_tag =
            tags.is_empty() || (category == ALL_CATEGORIES && tags.iter().any(|t| t == ANY_TAG));
        self.iter()
            .filter(|sample| category == ALL_CATEGORIES || sample.category() == category)
            .filter(|sample| any_tag || tags.iter().any(|t| sample.has_tag(t)))
            .collect()
    }
}

impl Default for SampleIndex {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(samples: &[&Sample]) -> Vec<String> {
        samples.iter().map(|s| s.id().to_string()).collect()
    }

    fn category_order() -> PriorityOrder {
        PriorityOrder::new(["api", "performance", "extensions"])
    }

    fn tag_order() -> PriorityOrder {
        PriorityOrder::new([ANY_TAG])
    }

    fn scenario() -> SampleIndex {
        SampleIndex::build(
            vec![
                Sample::new("A", "api").with_tags(["any"]),
                Sample::new("B", "api").with_tags(["compute"]),
                Sample::new("C", "performance").with_tags(["any", "compute"]),
            ],
            &category_order(),
            &tag_order(),
        )
    }

    #[test]
    fn test_empty_input() {
        let index = SampleIndex::build(Vec::<Sample>::new(), &category_order(), &tag_order());
        assert!(index.is_empty());
        assert!(index.categories().is_empty());
        assert!(index.tags().is_empty());
        assert!(index.by_category("api").is_empty());
    }

    #[test]
    fn test_none_and_blank_entries_skipped() {
        let index = SampleIndex::build(
            vec![
                None,
                Some(Sample::new("A", "api")),
                Some(Sample::new("", "api")),
                None,
            ],
            &category_order(),
            &tag_order(),
        );
        assert_eq!(index.len(), 1);
        assert!(index.find_by_id("A").is_some());
    }

    #[test]
    fn test_duplicate_id_last_wins() {
        let index = SampleIndex::build(
            vec![
                Sample::new("A", "api").with_tags(["compute"]),
                Sample::new("B", "api"),
                Sample::new("A", "extensions").with_tags(["ray_tracing"]),
            ],
            &category_order(),
            &tag_order(),
        );

        assert_eq!(index.len(), 2);
        assert_eq!(index.find_by_id("A").unwrap().category(), "extensions");
        assert_eq!(ids(&index.by_category("api")), ["B"]);
        assert_eq!(ids(&index.by_category("extensions")), ["A"]);
        assert!(index.by_tag("compute").is_empty());
        assert_eq!(index.tags(), ["any", "ray_tracing"]);
        assert_eq!(ids(&index.iter().collect::<Vec<_>>()), ["B", "A"]);
    }

    #[test]
    fn test_categories_sorted_by_priority() {
        let index = SampleIndex::build(
            vec![
                Sample::new("z", "zeta"),
                Sample::new("a", "api"),
                Sample::new("p", "performance"),
            ],
            &category_order(),
            &tag_order(),
        );
        assert_eq!(index.categories(), ["api", "performance", "zeta"]);
    }

    #[test]
    fn test_tags_sorted_with_any_first() {
        let index = scenario();
        assert_eq!(index.tags(), ["any", "compute"]);
    }

    #[test]
    fn test_by_category_preserves_insertion_order() {
        let index = scenario();
        assert_eq!(ids(&index.by_category("api")), ["A", "B"]);
        assert!(index.by_category("unknown").is_empty());
    }

    #[test]
    fn test_by_tags_is_union_without_duplicates() {
        let index = scenario();
        let tags: BTreeSet<String> = ["any".to_string(), "compute".to_string()].into();
        assert_eq!(ids(&index.by_tags(&tags)), ["A", "B", "C"]);
    }

    #[test]
    fn test_by_tags_empty_set_is_empty() {
        let index = scenario();
        assert!(index.by_tags(&BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_default_filter_shows_everything() {
        let index = scenario();
        assert_eq!(index.active_filter(), &index.all_tags_filter());
        assert_eq!(ids(&index.viewable("api")), ["A", "B"]);
        assert_eq!(ids(&index.viewable("performance")), ["C"]);
    }

    #[test]
    fn test_apply_filter_narrows_viewable() {
        let mut index = scenario();
        index.apply_filter(["compute".to_string()]);

        assert_eq!(ids(&index.viewable("api")), ["B"]);
        assert_eq!(ids(&index.viewable("performance")), ["C"]);
        // Buckets are untouched
        assert_eq!(ids(&index.by_category("api")), ["A", "B"]);
    }

    #[test]
    fn test_empty_filter_hides_everything() {
        let mut index = scenario();
        index.apply_filter(Vec::new());
        for category in index.categories().to_vec() {
            assert!(index.viewable(&category).is_empty());
        }
    }

    #[test]
    fn test_duplicate_tag_on_one_sample() {
        let index = SampleIndex::build(
            vec![Sample::new("A", "api").with_tags(["compute", "compute"])],
            &category_order(),
            &tag_order(),
        );
        assert_eq!(index.by_tag("compute").len(), 1);
    }

    #[test]
    fn test_batch_selection() {
        let index = scenario();

        assert_eq!(ids(&index.batch_selection("all", &[])), ["A", "B", "C"]);
        assert_eq!(ids(&index.batch_selection("all", &["any".to_string()])), ["A", "B", "C"]);
        assert_eq!(ids(&index.batch_selection("api", &[])), ["A", "B"]);
        assert_eq!(ids(&index.batch_selection("api", &["compute".to_string()])), ["B"]);
        assert_eq!(ids(&index.batch_selection("all", &["compute".to_string()])), ["B", "C"]);
        assert!(index.batch_selection("extensions", &[]).is_empty());
    }

    #[test]
    fn test_batch_sentinel_is_literal_within_a_category() {
        let mut index = scenario();
        index.apply_filter(["any".to_string()]);

        let filter: Vec<String> = index.active_filter().iter().cloned().collect();
        assert_eq!(ids(&index.batch_selection("api", &filter)), ["A"]);
        assert_eq!(ids(&index.batch_selection("api", &filter)), ids(&index.viewable("api")));
        assert_eq!(
            ids(&index.batch_selection("performance", &["any".to_string(), "compute".to_string()])),
            ["C"]
        );
    }
}
