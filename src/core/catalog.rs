/// Narrative catalog — validated entry sets, loading, and selection.

use rand::Rng;
use rustc_hash::FxHashSet;
use std::path::Path;
use thiserror::Error;

use crate::core::builtin;
use crate::schema::emotion::Emotion;
use crate::schema::narrative::{NarrativeEntry, NarrativeId};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("catalog has no narratives")]
    Empty,
    #[error("duplicate narrative id: {0}")]
    DuplicateId(NarrativeId),
}

/// A non-empty set of narratives with unique ids.
#[derive(Debug, Clone)]
pub struct NarrativeCatalog {
    entries: Vec<NarrativeEntry>,
}

impl NarrativeCatalog {
    /// Build a catalog, rejecting empty sets and repeated ids.
    pub fn new(entries: Vec<NarrativeEntry>) -> Result<NarrativeCatalog, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = FxHashSet::default();
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(CatalogError::DuplicateId(entry.id));
            }
        }
        Ok(NarrativeCatalog { entries })
    }

    /// The ten narratives that ship with the engine.
    pub fn builtin() -> NarrativeCatalog {
        NarrativeCatalog {
            entries: builtin::narratives(),
        }
    }

    /// Load a catalog from a RON file containing a list of entries.
    pub fn load_from_ron(path: &Path) -> Result<NarrativeCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<NarrativeCatalog, CatalogError> {
        let entries: Vec<NarrativeEntry> = ron::from_str(input)?;
        Self::new(entries)
    }

    /// Merge another catalog into this one. Entries from `other` replace
    /// entries in `self` with the same id; new ids are appended.
    pub fn merge(&mut self, other: NarrativeCatalog) {
        for entry in other.entries {
            match self.entries.iter_mut().find(|e| e.id == entry.id) {
                Some(existing) => {
                    tracing::warn!(id = %entry.id, "narrative replaced during merge");
                    *existing = entry;
                }
                None => self.entries.push(entry),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[NarrativeEntry] {
        &self.entries
    }

    pub fn get(&self, id: NarrativeId) -> Option<&NarrativeEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn by_emotion(&self, emotion: Emotion) -> impl Iterator<Item = &NarrativeEntry> {
        self.entries.iter().filter(move |e| e.emotion == emotion)
    }

    /// Draw a narrative uniformly at random.
    ///
    /// When `previous` is given and the catalog holds more than one entry,
    /// the draw is repeated until its id differs from `previous.id`. A
    /// single-entry catalog returns its entry regardless.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        previous: Option<&NarrativeEntry>,
        rng: &mut R,
    ) -> &NarrativeEntry {
        let len = self.entries.len();
        let mut draws = 1u32;
        let mut chosen = &self.entries[rng.gen_range(0..len)];
        if let Some(prev) = previous {
            if len > 1 {
                while chosen.id == prev.id {
                    chosen = &self.entries[rng.gen_range(0..len)];
                    draws += 1;
                }
            }
        }
        tracing::debug!(id = %chosen.id, emotion = %chosen.emotion, draws, "picked narrative");
        chosen
    }
}

impl Default for NarrativeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(id: u64, emotion: Emotion) -> NarrativeEntry {
        NarrativeEntry {
            id: NarrativeId(id),
            text: format!("Narrative number {}.", id),
            emotion,
            description: "Read it aloud".to_string(),
        }
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(matches!(
            NarrativeCatalog::new(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = NarrativeCatalog::new(vec![
            entry(1, Emotion::Joy),
            entry(2, Emotion::Fear),
            entry(1, Emotion::Anger),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(NarrativeId(1)))));
    }

    #[test]
    fn pick_never_repeats_previous() {
        let catalog = NarrativeCatalog::builtin();
        let previous = catalog.entries()[3].clone();
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = catalog.pick(Some(&previous), &mut rng);
            assert_ne!(picked.id, previous.id);
        }
    }

    #[test]
    fn pick_two_entries_alternates() {
        let catalog =
            NarrativeCatalog::new(vec![entry(1, Emotion::Joy), entry(2, Emotion::Sorrow)]).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let mut current = catalog.pick(None, &mut rng).clone();
        for _ in 0..50 {
            let next = catalog.pick(Some(&current), &mut rng).clone();
            assert_ne!(next.id, current.id);
            current = next;
        }
    }

    #[test]
    fn pick_single_entry_returns_it() {
        let only = entry(42, Emotion::Mixed);
        let catalog = NarrativeCatalog::new(vec![only.clone()]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(catalog.pick(Some(&only), &mut rng), &only);
        assert_eq!(catalog.pick(None, &mut rng), &only);
    }

    #[test]
    fn pick_without_previous_covers_catalog() {
        let catalog = NarrativeCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = FxHashSet::default();
        for _ in 0..1000 {
            seen.insert(catalog.pick(None, &mut rng).id);
        }
        assert_eq!(seen.len(), catalog.len());
    }

    #[test]
    fn pick_previous_not_in_catalog() {
        let catalog =
            NarrativeCatalog::new(vec![entry(1, Emotion::Joy), entry(2, Emotion::Sorrow)]).unwrap();
        let stranger = entry(99, Emotion::Fear);
        let mut rng = StdRng::seed_from_u64(3);
        let picked = catalog.pick(Some(&stranger), &mut rng);
        assert!(picked.id == NarrativeId(1) || picked.id == NarrativeId(2));
    }

    #[test]
    fn merge_replaces_and_appends() {
        let mut base =
            NarrativeCatalog::new(vec![entry(1, Emotion::Joy), entry(2, Emotion::Sorrow)]).unwrap();
        let mut replacement = entry(2, Emotion::Anger);
        replacement.text = "Replaced.".to_string();
        let other = NarrativeCatalog::new(vec![replacement, entry(3, Emotion::Fear)]).unwrap();

        base.merge(other);

        assert_eq!(base.len(), 3);
        let two = base.get(NarrativeId(2)).unwrap();
        assert_eq!(two.emotion, Emotion::Anger);
        assert_eq!(two.text, "Replaced.");
        assert!(base.get(NarrativeId(3)).is_some());
    }

    #[test]
    fn by_emotion_filters() {
        let catalog = NarrativeCatalog::builtin();
        let anger: Vec<_> = catalog.by_emotion(Emotion::Anger).collect();
        assert_eq!(anger.len(), 2);
        assert!(anger.iter().all(|e| e.emotion == Emotion::Anger));
        assert_eq!(catalog.by_emotion(Emotion::Mixed).count(), 0);
    }

    #[test]
    fn parse_ron_list() {
        let input = r#"[
            (id: (1), text: "First.", emotion: joy, description: "Smile"),
            (id: (2), text: "Second.", emotion: mixed, description: "Blend"),
        ]"#;
        let catalog = NarrativeCatalog::parse_ron(input).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(NarrativeId(2)).unwrap().emotion, Emotion::Mixed);
    }

    #[test]
    fn parse_ron_empty_list() {
        assert!(matches!(
            NarrativeCatalog::parse_ron("[]"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn parse_ron_bad_emotion() {
        let input = r#"[(id: (1), text: "x", emotion: boredom, description: "y")]"#;
        assert!(matches!(
            NarrativeCatalog::parse_ron(input),
            Err(CatalogError::Ron(_))
        ));
    }

    #[test]
    fn load_test_catalog_from_ron() {
        let path = std::path::PathBuf::from("tests/fixtures/test_narratives.ron");
        let catalog = NarrativeCatalog::load_from_ron(&path).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(NarrativeId(101)).unwrap().emotion, Emotion::Joy);
    }

    #[test]
    fn load_missing_file() {
        let path = std::path::PathBuf::from("tests/fixtures/does_not_exist.ron");
        assert!(matches!(
            NarrativeCatalog::load_from_ron(&path),
            Err(CatalogError::Io(_))
        ));
    }
}
