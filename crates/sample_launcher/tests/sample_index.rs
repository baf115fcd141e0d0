//! Index invariants checked over randomly generated sample lists, plus the
//! end-to-end filter scenario driven through the launcher.

use std::collections::{BTreeSet, HashMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use sample_launcher::prelude::*;

const CATEGORIES: [&str; 5] = ["api", "performance", "extensions", "tooling", "general"];
const TAGS: [&str; 5] = ["any", "compute", "ray_tracing", "mobile", "profiling"];

fn category_order() -> PriorityOrder {
    PriorityOrder::new(["api", "performance", "extensions"])
}

fn tag_order() -> PriorityOrder {
    PriorityOrder::new([ANY_TAG])
}

/// Random sample list with gaps (`None`) and repeated ids
fn random_input(rng: &mut StdRng) -> Vec<Option<Sample>> {
    let len = rng.gen_range(0..40);
    (0..len)
        .map(|_| {
            if rng.gen_bool(0.1) {
                return None;
            }
            let id = format!("sample_{}", rng.gen_range(0..25));
            let category = *CATEGORIES.choose(rng).unwrap();
            let tag_count = rng.gen_range(0..3);
            let tags: Vec<&str> = TAGS.choose_multiple(rng, tag_count).copied().collect();
            Some(Sample::new(id, category).with_tags(tags))
        })
        .collect()
}

/// Expected surviving samples: last entry per id
fn last_wins(input: &[Option<Sample>]) -> HashMap<String, Sample> {
    input
        .iter()
        .flatten()
        .map(|s| (s.id().to_string(), s.clone()))
        .collect()
}

fn ids(samples: &[&Sample]) -> Vec<String> {
    samples.iter().map(|s| s.id().to_string()).collect()
}

#[test]
fn test_random_indices_hold_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let input = random_input(&mut rng);
        let expected = last_wins(&input);
        let index = SampleIndex::build(input.clone(), &category_order(), &tag_order());

        // Every surviving sample is found by id
        assert_eq!(index.len(), expected.len());
        for (id, sample) in &expected {
            assert_eq!(index.find_by_id(id), Some(sample));
        }

        // Category buckets partition the samples
        let mut seen = HashSet::new();
        for category in index.categories() {
            for sample in index.by_category(category) {
                assert_eq!(sample.category(), category);
                assert!(seen.insert(sample.id().to_string()), "sample listed twice");
            }
        }
        assert_eq!(seen.len(), expected.len());

        // Tag buckets only hold carriers of the tag
        for tag in index.tags() {
            for sample in index.by_tag(tag) {
                assert!(sample.has_tag(tag));
            }
        }

        // Ordering is priority first, then alphabetical
        let mut sorted = index.categories().to_vec();
        category_order().sort(&mut sorted);
        assert_eq!(index.categories(), sorted.as_slice());

        // Union of two tags, without duplicates
        let t1 = TAGS.choose(&mut rng).unwrap().to_string();
        let t2 = TAGS.choose(&mut rng).unwrap().to_string();
        let pair: BTreeSet<String> = [t1.clone(), t2.clone()].into();
        let union = ids(&index.by_tags(&pair));
        let union_set: HashSet<&String> = union.iter().collect();
        assert_eq!(union.len(), union_set.len());

        let manual: HashSet<String> = index
            .by_tag(&t1)
            .into_iter()
            .chain(index.by_tag(&t2))
            .map(|s| s.id().to_string())
            .collect();
        assert_eq!(union_set.len(), manual.len());
        assert!(union.iter().all(|id| manual.contains(id)));

        assert!(index.by_tags(&BTreeSet::<String>::new()).is_empty());
    }
}

#[test]
fn test_random_filters_match_intersection() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let mut index = SampleIndex::build(random_input(&mut rng), &category_order(), &tag_order());
        let count = rng.gen_range(0..=TAGS.len());
        let filter: BTreeSet<String> = TAGS.choose_multiple(&mut rng, count).map(|t| t.to_string()).collect();
        index.apply_filter(filter.iter().cloned());

        let passing: HashSet<String> = ids(&index.by_tags(&filter)).into_iter().collect();
        for category in index.categories().to_vec() {
            let expected: Vec<String> = index
                .by_category(&category)
                .into_iter()
                .filter(|s| passing.contains(s.id()))
                .map(|s| s.id().to_string())
                .collect();
            assert_eq!(ids(&index.viewable(&category)), expected);
        }
    }
}

#[test]
fn test_category_ordering_example() {
    let index = SampleIndex::build(
        vec![
            Sample::new("z1", "zeta"),
            Sample::new("a1", "api"),
            Sample::new("p1", "performance"),
        ],
        &category_order(),
        &tag_order(),
    );
    assert_eq!(index.categories(), ["api", "performance", "zeta"]);
}

#[test]
fn test_cancelled_dialog_keeps_filter() {
    let mut index = SampleIndex::build(
        vec![
            Sample::new("A", "api").with_tags(["any"]),
            Sample::new("B", "api").with_tags(["compute"]),
        ],
        &category_order(),
        &tag_order(),
    );
    index.apply_filter(["any".to_string()]);

    let mut dialog = FilterDialog::for_index(&index);
    dialog.open(&index);
    dialog.toggle("compute", true);
    dialog.toggle("any", false);
    dialog.cancel();

    let expected: BTreeSet<String> = ["any".to_string()].into();
    assert_eq!(index.active_filter(), &expected);
    assert_eq!(ids(&index.viewable("api")), ["A"]);
}

#[test]
fn test_end_to_end_compute_filter() {
    let bridge = ManifestBridge::in_memory(vec![
        Sample::new("A", "api").with_tags(["any"]),
        Sample::new("B", "api").with_tags(["compute"]),
        Sample::new("C", "performance").with_tags(["any", "compute"]),
    ]);
    let mut launcher = Launcher::new(&LauncherConfig::default(), bridge).unwrap();
    assert_eq!(launcher.tabs(), ["api", "performance"]);

    launcher.open_filter();
    launcher.toggle_filter("any", false);
    assert!(launcher.apply_filter());

    assert_eq!(ids(&launcher.rows(0)), ["B"]);
    assert_eq!(ids(&launcher.rows(1)), ["C"]);

    let refreshes = launcher
        .take_events()
        .into_iter()
        .filter(|e| e.event_type == UiEventType::FilterApplied)
        .count();
    assert_eq!(refreshes, 1);

    launcher.select_tab(1).unwrap();
    let args = launcher.run_batch().unwrap();
    assert_eq!(args, ["batch", "--category", "performance", "--tag", "compute"]);

    let parsed = LaunchRequest::parse(&args).unwrap();
    let LaunchRequest::Batch { category, tags } = parsed.request else {
        panic!("expected a batch request");
    };
    let selected = ids(&launcher.index().batch_selection(&category, &tags));
    assert_eq!(selected, ids(&launcher.rows(1)));
    assert_eq!(selected, ["C"]);
}
