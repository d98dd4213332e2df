use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::INTEREST_LIMIT;

/// Topics a student can list on their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interest {
    Math,
    Science,
    English,
    History,
    Art,
    Music,
    Sports,
    Computers,
    Languages,
    Drama,
    Cooking,
    Baking,
    Robotics,
}

impl Interest {
    pub const ALL: [Self; 13] = [
        Self::Math,
        Self::Science,
        Self::English,
        Self::History,
        Self::Art,
        Self::Music,
        Self::Sports,
        Self::Computers,
        Self::Languages,
        Self::Drama,
        Self::Cooking,
        Self::Baking,
        Self::Robotics,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::English => "english",
            Self::History => "history",
            Self::Art => "art",
            Self::Music => "music",
            Self::Sports => "sports",
            Self::Computers => "computers",
            Self::Languages => "languages",
            Self::Drama => "drama",
            Self::Cooking => "cooking",
            Self::Baking => "baking",
            Self::Robotics => "robotics",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Math => "📊",
            Self::Science => "🔬",
            Self::English => "📚",
            Self::History => "🏛️",
            Self::Art => "🎨",
            Self::Music => "🎵",
            Self::Sports => "⚽",
            Self::Computers => "💻",
            Self::Languages => "🌍",
            Self::Drama => "🎭",
            Self::Cooking => "🍳",
            Self::Baking => "🍩",
            Self::Robotics => "🤖",
        }
    }
}

impl fmt::Display for Interest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Interest {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|interest| interest.key() == s.trim())
            .ok_or(())
    }
}

/// Selected interests in the order the student picked them.
///
/// Holds at most [`INTEREST_LIMIT`] distinct topics. Mutation is crate-private
/// so the cap is only ever checked in one place. Equality ignores pick order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterestSet(SmallVec<[Interest; INTEREST_LIMIT]>);

impl InterestSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, interest: Interest) -> bool {
        self.0.contains(&interest)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() >= INTEREST_LIMIT
    }

    pub fn iter(&self) -> impl Iterator<Item = Interest> + '_ {
        self.0.iter().copied()
    }

    /// True when there are no repeats and the cap holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.0.len() <= INTEREST_LIMIT
            && self
                .0
                .iter()
                .enumerate()
                .all(|(idx, interest)| !self.0[..idx].contains(interest))
    }

    pub(crate) fn push(&mut self, interest: Interest) {
        self.0.push(interest);
    }

    pub(crate) fn remove(&mut self, interest: Interest) {
        self.0.retain(|selected| *selected != interest);
    }
}

impl InterestSet {
    fn occurrences(&self, interest: Interest) -> usize {
        self.0.iter().filter(|picked| **picked == interest).count()
    }
}

impl PartialEq for InterestSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|interest| self.occurrences(interest) == other.occurrences(interest))
    }
}

impl Eq for InterestSet {}

impl<'a> IntoIterator for &'a InterestSet {
    type Item = &'a Interest;
    type IntoIter = std::slice::Iter<'a, Interest>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
