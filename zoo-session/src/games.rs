//! The mini-game catalogue.
//!
//! Each animal's content record names its game by tag. The games themselves
//! are host code; this module only maps tags to a closed set of kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the sixteen mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    /// Lion fact cards.
    Facts,
    /// Elephant memory pairs.
    Memory,
    /// Tiger hangman.
    Hangman,
    /// Gorilla vocabulary.
    Vocabulary,
    /// Kangaroo quiz.
    Quiz,
    /// Penguin arithmetic.
    Math,
    /// Parrot decimals.
    Decimal,
    /// Frog road crossing.
    Frogger,
    /// Snake.
    Snake,
    /// Panda soccer.
    Soccer,
    /// Free drawing.
    Drawing,
    /// Drawing with physics.
    Physics,
    /// Worm counting.
    Worms,
    /// Tree counting.
    Trees,
    /// Mouse maze.
    Maze,
    /// Letter defense.
    Letters,
}

impl GameKind {
    /// Every game, in catalogue order.
    pub const ALL: [Self; 16] = [
        Self::Facts,
        Self::Memory,
        Self::Hangman,
        Self::Vocabulary,
        Self::Quiz,
        Self::Math,
        Self::Decimal,
        Self::Frogger,
        Self::Snake,
        Self::Soccer,
        Self::Drawing,
        Self::Physics,
        Self::Worms,
        Self::Trees,
        Self::Maze,
        Self::Letters,
    ];

    /// The tag used in content records.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Facts => "facts",
            Self::Memory => "memory",
            Self::Hangman => "hangman",
            Self::Vocabulary => "vocabulary",
            Self::Quiz => "quiz",
            Self::Math => "math",
            Self::Decimal => "decimal",
            Self::Frogger => "frogger",
            Self::Snake => "snake",
            Self::Soccer => "soccer",
            Self::Drawing => "drawing",
            Self::Physics => "physics",
            Self::Worms => "worms",
            Self::Trees => "trees",
            Self::Maze => "maze",
            Self::Letters => "letters",
        }
    }

    /// Look up a game by tag. Tags are matched exactly.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.tag() == tag)
    }

    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Facts => "Lion Facts",
            Self::Memory => "Elephant Memory",
            Self::Hangman => "Tiger Hangman",
            Self::Vocabulary => "Gorilla Vocabulary",
            Self::Quiz => "Kangaroo Quiz",
            Self::Math => "Penguin Math",
            Self::Decimal => "Parrot Decimals",
            Self::Frogger => "Frogger",
            Self::Snake => "Snake",
            Self::Soccer => "Soccer",
            Self::Drawing => "Drawing",
            Self::Physics => "Physics Drawing",
            Self::Worms => "Worm Counting",
            Self::Trees => "Tree Counting",
            Self::Maze => "Maze",
            Self::Letters => "Letter Defense",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for game in GameKind::ALL {
            assert_eq!(GameKind::from_tag(game.tag()), Some(game));
        }
    }

    #[test]
    fn unknown_and_miscased_tags_are_rejected() {
        assert_eq!(GameKind::from_tag("chess"), None);
        assert_eq!(GameKind::from_tag("Facts"), None);
        assert_eq!(GameKind::from_tag(""), None);
    }

    #[test]
    fn bundled_catalogue_only_uses_known_games() {
        let animals = zoo_core::content::bundled_animals().expect("bundled");
        for a in &animals {
            assert!(GameKind::from_tag(&a.game).is_some(), "{} plays {}", a.name, a.game);
        }
    }
}
