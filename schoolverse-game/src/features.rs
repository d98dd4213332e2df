use serde::{Deserialize, Serialize};

use crate::constants::NOTICE_UNAVAILABLE_SUFFIX;

/// Menu entries that exist in the client but have no implementation yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Chat,
    Rooms,
    Profile,
    Achievements,
    Leaderboard,
    Help,
    Feedback,
}

impl Feature {
    pub const ALL: [Self; 7] = [
        Self::Chat,
        Self::Rooms,
        Self::Profile,
        Self::Achievements,
        Self::Leaderboard,
        Self::Help,
        Self::Feedback,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Chat => "Chat",
            Self::Rooms => "Room map",
            Self::Profile => "Student profile",
            Self::Achievements => "Achievements",
            Self::Leaderboard => "Leaderboard",
            Self::Help => "Help and FAQ",
            Self::Feedback => "Feedback form",
        }
    }

    #[must_use]
    pub const fn status(self) -> FeatureStatus {
        FeatureStatus::Unavailable
    }

    #[must_use]
    pub fn unavailable_message(self) -> String {
        format!("{} {NOTICE_UNAVAILABLE_SUFFIX}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Available,
    Unavailable,
}
