/// The narratives shipped with the engine, two per scored emotion.
use crate::schema::emotion::Emotion;
use crate::schema::narrative::{NarrativeEntry, NarrativeId};

const NARRATIVES: [(u64, Emotion, &str, &str); 10] = [
    (
        1,
        Emotion::Excitement,
        "Express pure joy and triumph",
        "I never thought I could climb to the top of that mountain, but as I stood there watching the sunrise paint the sky in brilliant oranges and pinks, I felt an incredible rush of pride and accomplishment. Every step of that difficult journey was worth this magical moment!",
    ),
    (
        2,
        Emotion::Sorrow,
        "Convey deep sadness and loss",
        "The old photograph fell from the dusty book, showing my grandmother's gentle smile one last time. I held it close to my heart, feeling the weight of all our lost conversations and the stories I'll never hear again.",
    ),
    (
        3,
        Emotion::Anger,
        "Show controlled fury and indignation",
        "This is completely unacceptable! How could you make such a decision without consulting anyone? The consequences of your actions will affect everyone here, and frankly, I'm furious that you thought this was okay!",
    ),
    (
        4,
        Emotion::Fear,
        "Express anxiety and terror",
        "The sound of footsteps echoing in the empty hallway made my heart race. I pressed myself against the wall, trying to stay invisible, as shadows danced menacingly in the flickering light. What if someone was actually there?",
    ),
    (
        5,
        Emotion::Joy,
        "Radiate pure happiness and delight",
        "When I saw my best friend walking through that door after two years apart, I couldn't contain my happiness! We ran toward each other laughing and crying at the same time. Nothing in the world could have made me happier than this perfect reunion!",
    ),
    (
        6,
        Emotion::Excitement,
        "Channel triumph and exhilaration",
        "I can't believe we actually won the championship! All those months of practice, the early morning training sessions, the setbacks and victories - it all led to this incredible moment. We proved that dreams really do come true when you never give up!",
    ),
    (
        7,
        Emotion::Sorrow,
        "Express melancholy and nostalgia",
        "As I walked through the empty house for the last time, each room whispered memories of the family that once filled these walls with laughter. Now only silence remains, heavy with the echoes of a lifetime that has passed.",
    ),
    (
        8,
        Emotion::Anger,
        "Show righteous indignation",
        "How dare you question my integrity! I have worked tirelessly for this organization for fifteen years, and I will not stand here and listen to these baseless accusations. This is an outrageous attack on my character!",
    ),
    (
        9,
        Emotion::Fear,
        "Convey growing panic and helplessness",
        "The storm was getting worse, and I realized I was completely lost in the forest. Every tree looked the same, every path led nowhere, and darkness was falling fast. My phone had no signal, and panic was setting in.",
    ),
    (
        10,
        Emotion::Joy,
        "Express overwhelming happiness and gratitude",
        "Surprise! The entire family had gathered for my birthday, even my cousin from Australia who I hadn't seen in five years. The room erupted in laughter and cheers as I stood there overwhelmed by so much love and thoughtfulness!",
    ),
];

/// Build the built-in narrative entries, ordered by id.
pub fn narratives() -> Vec<NarrativeEntry> {
    NARRATIVES
        .iter()
        .map(|(id, emotion, description, text)| NarrativeEntry {
            id: NarrativeId(*id),
            text: text.to_string(),
            emotion: *emotion,
            description: description.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn ten_entries_with_unique_ids() {
        let entries = narratives();
        assert_eq!(entries.len(), 10);
        let ids: FxHashSet<NarrativeId> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn two_per_scored_emotion() {
        let entries = narratives();
        for emotion in [
            Emotion::Excitement,
            Emotion::Sorrow,
            Emotion::Anger,
            Emotion::Fear,
            Emotion::Joy,
        ] {
            let count = entries.iter().filter(|e| e.emotion == emotion).count();
            assert_eq!(count, 2, "expected two {} narratives", emotion);
        }
    }

    #[test]
    fn no_empty_fields() {
        for entry in narratives() {
            assert!(!entry.text.is_empty());
            assert!(!entry.description.is_empty());
        }
    }
}
