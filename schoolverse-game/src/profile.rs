//! Per-session player record.
//!
//! Fields are readable by anyone but writable only inside this crate, so the
//! economy operations are the single path through which a profile changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::appearance::Appearance;
use crate::catalog::Catalog;
use crate::constants::{DEFAULT_STARTING_COINS, INTEREST_LIMIT};
use crate::interests::InterestSet;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("selected decoration `{0}` is not owned")]
    DecorationNotOwned(String),
    #[error("profile lists {count} interests but at most {limit} are allowed")]
    TooManyInterests { count: usize, limit: usize },
    #[error("profile lists the same interest more than once")]
    RepeatedInterest,
    #[error("owned item `{0}` is not in the catalog")]
    UnknownItem(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub(crate) coin_balance: u32,
    #[serde(default)]
    pub(crate) owned_items: BTreeSet<String>,
    #[serde(default)]
    pub(crate) selected_decoration: Option<String>,
    #[serde(default)]
    pub(crate) appearance: Appearance,
    #[serde(default)]
    pub(crate) interests: InterestSet,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_COINS)
    }
}

impl PlayerProfile {
    /// Fresh profile with nothing owned and nothing selected.
    #[must_use]
    pub fn new(starting_coins: u32) -> Self {
        Self {
            coin_balance: starting_coins,
            owned_items: BTreeSet::new(),
            selected_decoration: None,
            appearance: Appearance::default(),
            interests: InterestSet::new(),
        }
    }

    #[must_use]
    pub const fn coin_balance(&self) -> u32 {
        self.coin_balance
    }

    #[must_use]
    pub const fn owned_items(&self) -> &BTreeSet<String> {
        &self.owned_items
    }

    #[must_use]
    pub fn owns(&self, item_id: &str) -> bool {
        self.owned_items.contains(item_id)
    }

    #[must_use]
    pub fn selected_decoration(&self) -> Option<&str> {
        self.selected_decoration.as_deref()
    }

    #[must_use]
    pub const fn appearance(&self) -> Appearance {
        self.appearance
    }

    #[must_use]
    pub const fn interests(&self) -> &InterestSet {
        &self.interests
    }

    /// Check the invariants a profile from outside the session must satisfy.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if let Some(selected) = &self.selected_decoration
            && !self.owned_items.contains(selected)
        {
            return Err(ProfileError::DecorationNotOwned(selected.clone()));
        }
        if self.interests.len() > INTEREST_LIMIT {
            return Err(ProfileError::TooManyInterests {
                count: self.interests.len(),
                limit: INTEREST_LIMIT,
            });
        }
        if !self.interests.is_valid() {
            return Err(ProfileError::RepeatedInterest);
        }
        Ok(())
    }

    /// [`validate`](Self::validate), plus every owned item must exist in `catalog`.
    ///
    /// # Errors
    ///
    /// Returns the first broken invariant or the first unknown owned item.
    pub fn validate_against(&self, catalog: &Catalog) -> Result<(), ProfileError> {
        self.validate()?;
        match self
            .owned_items
            .iter()
            .find(|id| catalog.find_item(id).is_none())
        {
            Some(unknown) => Err(ProfileError::UnknownItem(unknown.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_starts_with_standard_balance() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.coin_balance(), DEFAULT_STARTING_COINS);
        assert!(profile.owned_items().is_empty());
        assert!(profile.selected_decoration().is_none());
        assert!(profile.interests().is_empty());
        assert_eq!(profile.appearance(), Appearance::default());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let profile: PlayerProfile = serde_json::from_str(r#"{"coin_balance": 40}"#).unwrap();
        assert_eq!(profile.coin_balance(), 40);
        assert!(profile.owned_items().is_empty());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn validate_rejects_unowned_selection() {
        let json = r#"{"coin_balance": 0, "owned_items": ["cap"], "selected_decoration": "crown"}"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.validate(),
            Err(ProfileError::DecorationNotOwned("crown".to_string()))
        );
    }

    #[test]
    fn validate_rejects_interest_overflow_and_repeats() {
        let json = r#"{
            "coin_balance": 0,
            "interests": ["math","art","music","drama","baking","sports"]
        }"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(
            profile.validate(),
            Err(ProfileError::TooManyInterests { count: 6, limit: 5 })
        );

        let json = r#"{"coin_balance": 0, "interests": ["math","math"]}"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.validate(), Err(ProfileError::RepeatedInterest));
    }

    #[test]
    fn validate_against_catalog_rejects_unknown_items() {
        let json = r#"{
            "coin_balance": 0,
            "owned_items": ["cap", "jetpack"],
            "selected_decoration": "jetpack"
        }"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert!(profile.validate().is_ok());
        assert_eq!(
            profile.validate_against(Catalog::standard()),
            Err(ProfileError::UnknownItem("jetpack".to_string()))
        );

        let json = r#"{"coin_balance": 0, "owned_items": ["cap"], "selected_decoration": "cap"}"#;
        let profile: PlayerProfile = serde_json::from_str(json).unwrap();
        assert!(profile.validate_against(Catalog::standard()).is_ok());
    }
}
