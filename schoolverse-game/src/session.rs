use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::appearance::{AppearanceChoice, AppearanceField};
use crate::catalog::{Catalog, CatalogItem, ItemCategory};
use crate::config::EconomyConfig;
use crate::constants::{NOTICE_ALREADY_OWNED, NOTICE_INSUFFICIENT_FUNDS, NOTICE_QUEUE_LIMIT};
use crate::economy::{self, CoinReward, EconomyError, InterestToggle, ItemStatus};
use crate::features::{Feature, FeatureStatus};
use crate::interests::Interest;
use crate::profile::{PlayerProfile, ProfileError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Toast-style message for the view layer to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Pending notices, oldest first. Keeps only the newest
/// [`NOTICE_QUEUE_LIMIT`] entries when the host falls behind on draining.
#[derive(Debug, Clone, Default)]
struct NoticeQueue(Vec<Notice>);

impl NoticeQueue {
    fn push(&mut self, notice: Notice) {
        if self.0.len() >= NOTICE_QUEUE_LIMIT {
            self.0.remove(0);
        }
        self.0.push(notice);
    }
}

/// One tile of the shop grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopEntry<'a> {
    pub item: &'a CatalogItem,
    pub status: ItemStatus,
}

/// Owns the current profile for a running client.
///
/// Each operation runs the matching [`economy`] transition and, on success,
/// publishes the result as the new current profile. Outcomes are queued as
/// [`Notice`]s; the host should call [`drain_notices`](Self::drain_notices)
/// after each interaction, since only the newest [`NOTICE_QUEUE_LIMIT`] are kept.
#[derive(Debug, Clone)]
pub struct SchoolSession {
    catalog: Arc<Catalog>,
    profile: PlayerProfile,
    notices: NoticeQueue,
}

impl SchoolSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: &EconomyConfig) -> Self {
        Self {
            catalog,
            profile: PlayerProfile::new(config.starting_coins),
            notices: NoticeQueue::default(),
        }
    }

    /// Resume from a previously saved profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile violates an invariant or owns an item
    /// missing from `catalog`.
    pub fn from_profile(
        catalog: Arc<Catalog>,
        profile: PlayerProfile,
    ) -> Result<Self, ProfileError> {
        profile.validate_against(&catalog)?;
        Ok(Self {
            catalog,
            profile,
            notices: NoticeQueue::default(),
        })
    }

    #[must_use]
    pub const fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn into_profile(self) -> PlayerProfile {
        self.profile
    }

    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices.0
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices.0)
    }

    /// Shop tiles for a shelf (or all shelves) with their purchase state.
    #[must_use]
    pub fn shop(&self, category: Option<ItemCategory>) -> Vec<ShopEntry<'_>> {
        self.catalog
            .by_category(category)
            .map(|item| ShopEntry {
                item,
                status: economy::item_status(&self.profile, item),
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns `UnknownItem`, `AlreadyOwned` or `InsufficientFunds`.
    pub fn purchase(&mut self, item_id: &str) -> Result<(), EconomyError> {
        let Some(item) = self.catalog.find_item(item_id) else {
            let err = EconomyError::UnknownItem {
                item_id: item_id.to_string(),
            };
            self.notices.push(Notice::new(NoticeKind::Error, err.to_string()));
            return Err(err);
        };
        match economy::purchase(&self.profile, item) {
            Ok(next) => {
                self.notices.push(Notice::new(
                    NoticeKind::Success,
                    format!(
                        "{} purchased! Find it in the Avatar tab.",
                        item.display_name
                    ),
                ));
                self.profile = next;
                Ok(())
            }
            Err(err) => {
                self.notices.push(error_notice(&err));
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// Returns `LimitReached` when the selection is already full.
    pub fn toggle_interest(&mut self, interest: Interest) -> Result<InterestToggle, EconomyError> {
        let (next, toggle) = economy::toggle_interest(&self.profile, interest)
            .inspect_err(|err| self.notices.push(error_notice(err)))?;
        self.profile = next;
        Ok(toggle)
    }

    pub fn select_appearance(&mut self, choice: AppearanceChoice) {
        self.profile = economy::select_appearance(&self.profile, choice);
    }

    /// # Errors
    ///
    /// Returns `InvalidOption` when `value` is outside the palette.
    pub fn select_appearance_named(
        &mut self,
        field: AppearanceField,
        value: &str,
    ) -> Result<(), EconomyError> {
        self.profile = economy::select_appearance_named(&self.profile, field, value)
            .inspect_err(|err| self.notices.push(error_notice(err)))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotOwned` when equipping something not bought.
    pub fn select_decoration(&mut self, item_id: Option<&str>) -> Result<(), EconomyError> {
        self.profile = economy::select_decoration(&self.profile, item_id)
            .inspect_err(|err| self.notices.push(error_notice(err)))?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotOwned` when equipping something not bought.
    pub fn toggle_decoration(&mut self, item_id: &str) -> Result<(), EconomyError> {
        self.profile = economy::toggle_decoration(&self.profile, item_id)
            .inspect_err(|err| self.notices.push(error_notice(err)))?;
        Ok(())
    }

    /// Credit a reward and return the new balance.
    pub fn earn(&mut self, reward: CoinReward) -> u32 {
        self.profile = economy::earn(&self.profile, reward);
        self.notices.push(Notice::new(
            NoticeKind::Success,
            format!("+{} coins", reward.coins()),
        ));
        self.profile.coin_balance()
    }

    /// Report a menu feature's availability without blocking the caller.
    ///
    /// Every menu feature is a placeholder for now, so this always queues an
    /// info notice.
    pub fn open_feature(&mut self, feature: Feature) -> FeatureStatus {
        self.notices
            .push(Notice::new(NoticeKind::Info, feature.unavailable_message()));
        feature.status()
    }
}

fn error_notice(err: &EconomyError) -> Notice {
    let message = match err {
        EconomyError::AlreadyOwned { .. } => NOTICE_ALREADY_OWNED.to_string(),
        EconomyError::InsufficientFunds { .. } => NOTICE_INSUFFICIENT_FUNDS.to_string(),
        EconomyError::LimitReached { limit } => {
            format!("You can pick at most {limit} interests.")
        }
        other => other.to_string(),
    };
    Notice::new(NoticeKind::Error, message)
}
