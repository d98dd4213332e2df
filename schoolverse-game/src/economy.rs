//! Shop purchases, coin rewards and profile selections.
//!
//! Every operation takes the current profile by reference and returns the
//! next one. A rejected operation returns an [`EconomyError`] and leaves the
//! caller's profile untouched, so there is never a half-applied purchase.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::appearance::{AppearanceChoice, AppearanceField};
use crate::catalog::CatalogItem;
use crate::constants::{
    INTEREST_LIMIT, REWARD_DAILY_CHALLENGE, REWARD_QUIZ_ANSWER, REWARD_ROOM_EXPLORED,
    REWARD_TEACHER_MET,
};
use crate::interests::Interest;
use crate::profile::PlayerProfile;

/// Recoverable rejections. None of them change the profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("decoration `{item_id}` is already owned")]
    AlreadyOwned { item_id: String },
    #[error("decoration `{item_id}` costs {required} coins but only {available} are available")]
    InsufficientFunds {
        item_id: String,
        required: u32,
        available: u32,
    },
    #[error("at most {limit} interests can be selected")]
    LimitReached { limit: usize },
    #[error("`{value}` is not a valid {field} option")]
    InvalidOption {
        field: AppearanceField,
        value: String,
    },
    #[error("decoration `{item_id}` is not owned")]
    NotOwned { item_id: String },
    #[error("no catalog item with id `{item_id}`")]
    UnknownItem { item_id: String },
}

/// How a purchase button should render for a given profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Owned,
    Affordable,
    TooExpensive,
}

/// What a successful interest toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestToggle {
    Added,
    Removed,
}

/// Activities that pay out coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoinReward {
    TeacherMet,
    RoomExplored,
    QuizAnswer,
    DailyChallenge,
}

impl CoinReward {
    pub const ALL: [Self; 4] = [
        Self::TeacherMet,
        Self::RoomExplored,
        Self::QuizAnswer,
        Self::DailyChallenge,
    ];

    #[must_use]
    pub const fn coins(self) -> u32 {
        match self {
            Self::TeacherMet => REWARD_TEACHER_MET,
            Self::RoomExplored => REWARD_ROOM_EXPLORED,
            Self::QuizAnswer => REWARD_QUIZ_ANSWER,
            Self::DailyChallenge => REWARD_DAILY_CHALLENGE,
        }
    }
}

#[must_use]
pub fn item_status(profile: &PlayerProfile, item: &CatalogItem) -> ItemStatus {
    if profile.owns(&item.id) {
        ItemStatus::Owned
    } else if profile.coin_balance >= item.price {
        ItemStatus::Affordable
    } else {
        ItemStatus::TooExpensive
    }
}

/// Buy a decoration.
///
/// Ownership is checked before affordability, so an owned item reports
/// `AlreadyOwned` even when the balance is short.
///
/// # Errors
///
/// Returns `AlreadyOwned` or `InsufficientFunds`; the input profile is unchanged.
pub fn purchase(
    profile: &PlayerProfile,
    item: &CatalogItem,
) -> Result<PlayerProfile, EconomyError> {
    if profile.owns(&item.id) {
        info!("purchase of `{}` rejected: already owned", item.id);
        return Err(EconomyError::AlreadyOwned {
            item_id: item.id.clone(),
        });
    }
    let Some(remaining) = profile.coin_balance.checked_sub(item.price) else {
        info!(
            "purchase of `{}` rejected: {} < {}",
            item.id, profile.coin_balance, item.price
        );
        return Err(EconomyError::InsufficientFunds {
            item_id: item.id.clone(),
            required: item.price,
            available: profile.coin_balance,
        });
    };

    let mut next = profile.clone();
    next.coin_balance = remaining;
    next.owned_items.insert(item.id.clone());
    debug!(
        "purchased `{}` for {} coins, balance {}",
        item.id, item.price, remaining
    );
    Ok(next)
}

/// Add or remove an interest.
///
/// Removing is always allowed. Adding past the cap is rejected instead of
/// silently ignored so the view can tell the student why nothing happened.
///
/// # Errors
///
/// Returns `LimitReached` when adding to a full selection.
pub fn toggle_interest(
    profile: &PlayerProfile,
    interest: Interest,
) -> Result<(PlayerProfile, InterestToggle), EconomyError> {
    let mut next = profile.clone();
    if profile.interests.contains(interest) {
        next.interests.remove(interest);
        debug!("interest `{interest}` removed");
        return Ok((next, InterestToggle::Removed));
    }
    if profile.interests.is_full() {
        info!("interest `{interest}` rejected: limit {INTEREST_LIMIT} reached");
        return Err(EconomyError::LimitReached {
            limit: INTEREST_LIMIT,
        });
    }
    next.interests.push(interest);
    debug!("interest `{interest}` added");
    Ok((next, InterestToggle::Added))
}

#[must_use]
pub fn select_appearance(profile: &PlayerProfile, choice: AppearanceChoice) -> PlayerProfile {
    let mut next = profile.clone();
    next.appearance = profile.appearance.with(choice);
    debug!("appearance {} set to {choice:?}", choice.field());
    next
}

/// String-valued variant of [`select_appearance`] for hosts without typed input.
///
/// # Errors
///
/// Returns `InvalidOption` when `value` is not in the palette for `field`.
pub fn select_appearance_named(
    profile: &PlayerProfile,
    field: AppearanceField,
    value: &str,
) -> Result<PlayerProfile, EconomyError> {
    let choice = AppearanceChoice::parse(field, value)?;
    Ok(select_appearance(profile, choice))
}

/// Equip an owned decoration, or clear the slot with `None`.
///
/// # Errors
///
/// Returns `NotOwned` when equipping something the profile has not bought.
pub fn select_decoration(
    profile: &PlayerProfile,
    item_id: Option<&str>,
) -> Result<PlayerProfile, EconomyError> {
    if let Some(id) = item_id
        && !profile.owns(id)
    {
        return Err(EconomyError::NotOwned {
            item_id: id.to_string(),
        });
    }
    let mut next = profile.clone();
    next.selected_decoration = item_id.map(str::to_string);
    debug!("decoration set to {item_id:?}");
    Ok(next)
}

/// Equip `item_id`, or unequip it when it is already worn.
///
/// # Errors
///
/// Returns `NotOwned` when equipping something the profile has not bought.
pub fn toggle_decoration(
    profile: &PlayerProfile,
    item_id: &str,
) -> Result<PlayerProfile, EconomyError> {
    if profile.selected_decoration() == Some(item_id) {
        select_decoration(profile, None)
    } else {
        select_decoration(profile, Some(item_id))
    }
}

/// Credit a reward. Balances saturate rather than wrap.
#[must_use]
pub fn earn(profile: &PlayerProfile, reward: CoinReward) -> PlayerProfile {
    let mut next = profile.clone();
    next.coin_balance = profile.coin_balance.saturating_add(reward.coins());
    debug!(
        "earned {} coins for {reward:?}, balance {}",
        reward.coins(),
        next.coin_balance
    );
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{HairColor, SkinTone};
    use crate::catalog::Catalog;

    fn item(id: &str) -> &'static CatalogItem {
        Catalog::standard().find_item(id).unwrap()
    }

    #[test]
    fn purchase_deducts_and_grants() {
        let profile = PlayerProfile::new(250);
        let next = purchase(&profile, item("crown")).unwrap();
        assert_eq!(next.coin_balance(), 150);
        assert!(next.owns("crown"));
        assert_eq!(profile.coin_balance(), 250);
        assert!(!profile.owns("crown"));
    }

    #[test]
    fn purchase_rejects_repeat_buy() {
        let profile = purchase(&PlayerProfile::new(250), item("crown")).unwrap();
        let err = purchase(&profile, item("crown")).unwrap_err();
        assert_eq!(
            err,
            EconomyError::AlreadyOwned {
                item_id: "crown".to_string()
            }
        );
        assert_eq!(profile.coin_balance(), 150);
    }

    #[test]
    fn purchase_rejects_when_short() {
        let profile = PlayerProfile::new(40);
        let err = purchase(&profile, item("cap")).unwrap_err();
        assert_eq!(
            err,
            EconomyError::InsufficientFunds {
                item_id: "cap".to_string(),
                required: 50,
                available: 40,
            }
        );
    }

    #[test]
    fn ownership_is_checked_before_funds() {
        let owned = purchase(&PlayerProfile::new(100), item("crown")).unwrap();
        assert_eq!(owned.coin_balance(), 0);
        assert!(matches!(
            purchase(&owned, item("crown")),
            Err(EconomyError::AlreadyOwned { .. })
        ));
    }

    #[test]
    fn exact_balance_is_enough() {
        let next = purchase(&PlayerProfile::new(200), item("diamond")).unwrap();
        assert_eq!(next.coin_balance(), 0);
    }

    #[test]
    fn item_status_tracks_balance_and_ownership() {
        let profile = PlayerProfile::new(60);
        assert_eq!(item_status(&profile, item("cap")), ItemStatus::Affordable);
        assert_eq!(item_status(&profile, item("crown")), ItemStatus::TooExpensive);
        let profile = purchase(&profile, item("cap")).unwrap();
        assert_eq!(item_status(&profile, item("cap")), ItemStatus::Owned);
    }

    #[test]
    fn interest_toggle_twice_is_identity() {
        let profile = PlayerProfile::default();
        let (added, how) = toggle_interest(&profile, Interest::Robotics).unwrap();
        assert_eq!(how, InterestToggle::Added);
        let (back, how) = toggle_interest(&added, Interest::Robotics).unwrap();
        assert_eq!(how, InterestToggle::Removed);
        assert_eq!(back, profile);
    }

    #[test]
    fn sixth_interest_hits_the_limit() {
        let mut profile = PlayerProfile::default();
        for interest in &Interest::ALL[..5] {
            profile = toggle_interest(&profile, *interest).unwrap().0;
        }
        let err = toggle_interest(&profile, Interest::Baking).unwrap_err();
        assert_eq!(err, EconomyError::LimitReached { limit: 5 });
        assert_eq!(profile.interests().len(), 5);

        let (freed, _) = toggle_interest(&profile, Interest::Math).unwrap();
        let (full, how) = toggle_interest(&freed, Interest::Baking).unwrap();
        assert_eq!(how, InterestToggle::Added);
        assert_eq!(full.interests().len(), 5);
        assert!(full.interests().contains(Interest::Baking));
        assert!(!full.interests().contains(Interest::Math));
    }

    #[test]
    fn appearance_selection_overwrites_slot() {
        let profile = PlayerProfile::default();
        let next = select_appearance(&profile, AppearanceChoice::Hair(HairColor::Green));
        assert_eq!(next.appearance().hair, HairColor::Green);
        let next = select_appearance_named(&next, AppearanceField::Skin, "deep").unwrap();
        assert_eq!(next.appearance().skin, SkinTone::Deep);
        assert_eq!(next.appearance().hair, HairColor::Green);
    }

    #[test]
    fn appearance_named_rejects_unknown_value() {
        let profile = PlayerProfile::default();
        let err = select_appearance_named(&profile, AppearanceField::Shirt, "plaid").unwrap_err();
        assert_eq!(
            err,
            EconomyError::InvalidOption {
                field: AppearanceField::Shirt,
                value: "plaid".to_string(),
            }
        );
    }

    #[test]
    fn decoration_must_be_owned() {
        let profile = PlayerProfile::default();
        assert_eq!(
            select_decoration(&profile, Some("star")),
            Err(EconomyError::NotOwned {
                item_id: "star".to_string()
            })
        );
        let owned = purchase(&profile, item("star")).unwrap();
        let worn = select_decoration(&owned, Some("star")).unwrap();
        assert_eq!(worn.selected_decoration(), Some("star"));
        assert!(worn.validate().is_ok());
        let cleared = select_decoration(&worn, None).unwrap();
        assert_eq!(cleared.selected_decoration(), None);
    }

    #[test]
    fn toggle_decoration_unequips_current() {
        let owned = purchase(&PlayerProfile::default(), item("heart")).unwrap();
        let worn = toggle_decoration(&owned, "heart").unwrap();
        assert_eq!(worn.selected_decoration(), Some("heart"));
        let bare = toggle_decoration(&worn, "heart").unwrap();
        assert_eq!(bare.selected_decoration(), None);
    }

    #[test]
    fn rewards_credit_fixed_amounts() {
        let profile = PlayerProfile::new(0);
        let total: u32 = CoinReward::ALL
            .iter()
            .fold(profile, |acc, reward| earn(&acc, *reward))
            .coin_balance();
        assert_eq!(total, 10 + 15 + 25 + 50);
    }

    #[test]
    fn rewards_saturate_at_max() {
        let profile = PlayerProfile::new(u32::MAX - 1);
        let next = earn(&profile, CoinReward::DailyChallenge);
        assert_eq!(next.coin_balance(), u32::MAX);
    }
}
