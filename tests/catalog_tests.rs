/// Catalog loading and selection integration tests.

use neura_speech::core::catalog::NarrativeCatalog;
use neura_speech::schema::emotion::Emotion;
use neura_speech::schema::narrative::NarrativeId;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

#[test]
fn shipped_catalog_file_matches_builtin() {
    let path = std::path::Path::new("data/narratives.ron");
    let loaded = NarrativeCatalog::load_from_ron(path).unwrap();
    let builtin = NarrativeCatalog::builtin();
    assert_eq!(loaded.entries(), builtin.entries());
}

#[test]
fn every_entry_has_recognized_emotion_label() {
    let catalog = NarrativeCatalog::builtin();
    for entry in catalog.entries() {
        assert_eq!(
            Emotion::parse(entry.emotion.label()),
            Some(entry.emotion),
            "Entry {} has an unparseable emotion",
            entry.id
        );
    }
}

#[test]
fn repeated_picks_never_return_previous() {
    let catalog = NarrativeCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(2024);
    for previous in catalog.entries() {
        for _ in 0..200 {
            let picked = catalog.pick(Some(previous), &mut rng);
            assert_ne!(picked.id, previous.id);
        }
    }
}

#[test]
fn picks_are_roughly_uniform() {
    let catalog = NarrativeCatalog::builtin();
    let mut rng = StdRng::seed_from_u64(17);
    let mut counts: FxHashMap<NarrativeId, u32> = FxHashMap::default();
    let draws = 10_000;
    for _ in 0..draws {
        *counts.entry(catalog.pick(None, &mut rng).id).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 10);
    for (id, count) in &counts {
        assert!(
            *count > 800 && *count < 1200,
            "Narrative {} drawn {} times out of {}",
            id,
            count,
            draws
        );
    }
}

#[test]
fn excluding_previous_spreads_over_the_rest() {
    let catalog = NarrativeCatalog::builtin();
    let previous = catalog.get(NarrativeId(1)).unwrap();
    let mut rng = StdRng::seed_from_u64(99);
    let mut counts: FxHashMap<NarrativeId, u32> = FxHashMap::default();
    for _ in 0..9_000 {
        *counts.entry(catalog.pick(Some(previous), &mut rng).id).or_insert(0) += 1;
    }
    assert_eq!(counts.len(), 9);
    assert!(!counts.contains_key(&NarrativeId(1)));
    for count in counts.values() {
        assert!(*count > 700 && *count < 1300);
    }
}

#[test]
fn fixture_overrides_merge_into_builtin() {
    let mut catalog = NarrativeCatalog::builtin();
    let extra =
        NarrativeCatalog::load_from_ron(std::path::Path::new("tests/fixtures/test_narratives.ron"))
            .unwrap();
    catalog.merge(extra);
    assert_eq!(catalog.len(), 13);
    assert_eq!(catalog.by_emotion(Emotion::Mixed).count(), 1);
    assert_eq!(catalog.by_emotion(Emotion::Sorrow).count(), 3);
}
