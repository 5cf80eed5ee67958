use crate::models::domain::curriculum::{Chapter, ChapterStatus};
use crate::models::domain::game_level::GameLevel;

pub const DEMO_TOPIC: &str = "The Solar System (sample)";

/// Canned chapter outline for demo mode. Ids and unlock state are assigned
/// when the curriculum is built.
pub fn demo_chapters() -> Vec<Chapter> {
    let chapter = |title: &str, description: &str, topics: &[&str]| Chapter {
        id: 0,
        title: title.to_string(),
        description: description.to_string(),
        status: ChapterStatus::Locked,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        sources: None,
    };

    vec![
        chapter(
            "The Sun, Our Engine of Light",
            "Meet the star that powers everything you have ever seen.",
            &["Solar temperature", "Sunlight"],
        ),
        chapter(
            "The Rocky Worlds",
            "Mercury, Venus, Earth and Mars, four siblings of stone.",
            &["Inner planets"],
        ),
        chapter(
            "Giants of Gas",
            "Jupiter and Saturn, kings of sheer size.",
            &["Outer planets"],
        ),
        chapter(
            "Beyond the Last Orbit",
            "Comets, dwarf planets and the Kuiper belt.",
            &["Deep space"],
        ),
    ]
}

/// Five playable sample levels, used for every demo chapter. The first two
/// are the general-culture gatekeepers, the rest stick to the chapter theme.
pub fn demo_levels() -> Vec<GameLevel> {
    let level = |id: i32,
                 category: &str,
                 scenic: &str,
                 riddle: &str,
                 options: &[&str],
                 correct: &str,
                 hints: &[&str],
                 explanation: &str,
                 snippet: &str,
                 congratulation: &str| GameLevel {
        id,
        category: category.to_string(),
        scenic_description: scenic.to_string(),
        riddle: riddle.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer: correct.to_string(),
        hints: hints.iter().map(|h| h.to_string()).collect(),
        explanation: explanation.to_string(),
        knowledge_snippet: snippet.to_string(),
        congratulation_message: congratulation.to_string(),
        sources: None,
    };

    vec![
        level(
            1,
            "World geography",
            "Before boarding the ship you must prove you know your own planet.",
            "Which river carries more water than any other on Earth?",
            &["Nile", "Amazon", "Mississippi", "Danube"],
            "Amazon",
            &[
                "It runs through South America.",
                "Its basin is the largest on the planet.",
                "It crosses the largest rainforest.",
            ],
            "The Amazon discharges more water than the next seven largest rivers combined, shaping climate far beyond its banks.",
            "Around one fifth of all river water entering the oceans flows out of the Amazon.",
            "Toll paid. Welcome aboard.",
        ),
        level(
            2,
            "World literature",
            "The ship's security system demands a literary passphrase.",
            "Who wrote Don Quixote?",
            &[
                "Lope de Vega",
                "Federico Garcia Lorca",
                "Miguel de Cervantes",
                "Francisco de Quevedo",
            ],
            "Miguel de Cervantes",
            &[
                "He lost the use of a hand at the battle of Lepanto.",
                "His book is printed more than any other novel.",
                "He was born in Alcala de Henares.",
            ],
            "Cervantes published the first part in 1605 and reshaped what a novel could be.",
            "Don Quixote is often called the first modern novel.",
            "Access granted to the core of knowledge.",
        ),
        level(
            3,
            "Basic astronomy",
            "In open space at last, you swing the main telescope toward the inner dark.",
            "Which planet orbits closest to the Sun?",
            &["Venus", "Mars", "Mercury", "Jupiter"],
            "Mercury",
            &[
                "It is small and scorched.",
                "Its name starts with M.",
                "It has no moons.",
            ],
            "Mercury is the innermost planet, racing around the Sun on the tightest orbit.",
            "A year on Mercury lasts only 88 Earth days.",
            "Flawless stellar navigation.",
        ),
        level(
            4,
            "The Sun",
            "You drift near the solar corona. The heat gauges are screaming.",
            "Which process generates the Sun's energy?",
            &["Combustion", "Nuclear fission", "Nuclear fusion", "Magnetism"],
            "Nuclear fusion",
            &[
                "Hydrogen atoms join together.",
                "It releases enormous energy.",
                "It happens in the core.",
            ],
            "Stars shine because hydrogen nuclei fuse into helium in their cores, releasing energy as light.",
            "The Sun fuses about 600 million tonnes of hydrogen every second.",
            "You withstood the heat of knowledge.",
        ),
        level(
            5,
            "Solar curiosities",
            "One final seal stands between you and this sector's exit.",
            "How long does sunlight take to reach Earth?",
            &["8 seconds", "8 minutes", "8 hours", "It is instantaneous"],
            "8 minutes",
            &[
                "Light travels at 300,000 km per second.",
                "The distance is about 150 million km.",
                "Less than ten minutes.",
            ],
            "Across 150 million kilometres, even light needs about 8 minutes and 20 seconds, so we always see the Sun slightly in the past.",
            "If the Sun went out, we would not know for over 8 minutes.",
            "Chapter escaped, astronaut.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::play_session::HINT_LIMIT;

    #[test]
    fn test_demo_levels_are_well_formed() {
        let levels = demo_levels();
        assert_eq!(levels.len(), 5);

        for (index, level) in levels.iter().enumerate() {
            assert_eq!(level.id, index as i32 + 1);
            assert!(level.options.len() >= 2);
            assert!(level.options.contains(&level.correct_answer));
            assert!(level.hints.len() <= HINT_LIMIT);
            assert!(!level.riddle.is_empty());
        }
    }

    #[test]
    fn test_demo_chapters_have_topics() {
        let chapters = demo_chapters();
        assert_eq!(chapters.len(), 4);
        assert!(chapters.iter().all(|c| !c.topics.is_empty()));
    }
}
