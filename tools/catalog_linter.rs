/// Catalog Linter — validates narrative catalog files.
///
/// Usage: catalog_linter <catalog.ron | catalog_dir>

use neura_speech::core::catalog::NarrativeCatalog;
use neura_speech::schema::emotion::Emotion;
use neura_speech::schema::narrative::{NarrativeEntry, NarrativeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use std::process;

const MIN_WORDS: usize = 20;
const MAX_WORDS: usize = 80;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_linter <catalog.ron | catalog_dir>");
        process::exit(0);
    }

    let catalog_path = Path::new(&args[1]);
    let mut entries = Vec::new();
    let mut load_errors = Vec::new();

    if catalog_path.is_file() {
        load_file(catalog_path, &mut entries, &mut load_errors);
    } else if catalog_path.is_dir() {
        load_recursive(catalog_path, &mut entries, &mut load_errors);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args[1]);
        process::exit(1);
    }

    println!("Loaded {} narratives", entries.len());

    let (mut errors, warnings) = lint_entries(&entries);
    errors.extend(load_errors);

    println!("\n=== Catalog Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn load_file(path: &Path, entries: &mut Vec<NarrativeEntry>, errors: &mut Vec<String>) {
    // Parse the raw list so every problem is reported, not just the first
    // one `NarrativeCatalog::new` would reject.
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            errors.push(format!("{}: {}", path.display(), e));
            return;
        }
    };
    match ron::from_str::<Vec<NarrativeEntry>>(&contents) {
        Ok(list) => {
            println!("  Loaded: {} ({} narratives)", path.display(), list.len());
            entries.extend(list);
        }
        Err(e) => errors.push(format!("{}: {}", path.display(), e)),
    }
}

fn load_recursive(dir: &Path, entries: &mut Vec<NarrativeEntry>, errors: &mut Vec<String>) {
    if let Ok(dir_entries) = std::fs::read_dir(dir) {
        for entry in dir_entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_recursive(&path, entries, errors);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                load_file(&path, entries, errors);
            }
        }
    }
}

fn lint_entries(entries: &[NarrativeEntry]) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if entries.is_empty() {
        errors.push("Catalog has no narratives".to_string());
        return (errors, warnings);
    }

    let mut seen: FxHashSet<NarrativeId> = FxHashSet::default();
    let mut per_emotion: FxHashMap<Emotion, usize> = FxHashMap::default();

    for entry in entries {
        if !seen.insert(entry.id) {
            errors.push(format!("Narrative id {} is used more than once", entry.id));
        }
        *per_emotion.entry(entry.emotion).or_insert(0) += 1;

        if entry.text.trim().is_empty() {
            errors.push(format!("Narrative {} has empty text", entry.id));
            continue;
        }
        if entry.description.trim().is_empty() {
            warnings.push(format!("Narrative {} has no description", entry.id));
        }

        let words = entry.text.split_whitespace().count();
        if words < MIN_WORDS {
            warnings.push(format!(
                "Narrative {} has only {} words (minimum {} recommended)",
                entry.id, words, MIN_WORDS
            ));
        } else if words > MAX_WORDS {
            warnings.push(format!(
                "Narrative {} has {} words (maximum {} recommended)",
                entry.id, words, MAX_WORDS
            ));
        }
    }

    // Coverage: every scored emotion should have something to practice.
    for emotion in Emotion::ALL {
        if emotion == Emotion::Mixed {
            continue;
        }
        match per_emotion.get(&emotion).copied().unwrap_or(0) {
            0 => warnings.push(format!("No narratives for emotion '{}'", emotion)),
            1 => warnings.push(format!(
                "Only one narrative for emotion '{}'; repeats will alternate with other emotions",
                emotion
            )),
            _ => {}
        }
    }

    if errors.is_empty() {
        if let Err(e) = NarrativeCatalog::new(entries.to_vec()) {
            errors.push(format!("Catalog rejected: {}", e));
        }
    }

    (errors, warnings)
}
