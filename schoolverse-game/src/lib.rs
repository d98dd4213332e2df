//! SchoolVerse Economy Engine
//!
//! Platform-agnostic player economy for the SchoolVerse virtual school.
//! This crate owns coins, the decoration shop, avatar palettes and interest
//! selection without any UI or platform-specific dependencies.

pub mod appearance;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod economy;
pub mod features;
pub mod interests;
pub mod profile;
pub mod session;

use std::sync::Arc;

// Re-export commonly used types
pub use appearance::{
    Appearance, AppearanceChoice, AppearanceField, HairColor, ShirtColor, SkinTone,
};
pub use catalog::{Catalog, CatalogError, CatalogItem, ItemCategory};
pub use config::EconomyConfig;
pub use economy::{
    CoinReward, EconomyError, InterestToggle, ItemStatus, earn, item_status, purchase,
    select_appearance, select_appearance_named, select_decoration, toggle_decoration,
    toggle_interest,
};
pub use features::{Feature, FeatureStatus};
pub use interests::{Interest, InterestSet};
pub use profile::{PlayerProfile, ProfileError};
pub use session::{Notice, NoticeKind, SchoolSession, ShopEntry};

/// Trait for abstracting asset loading operations
/// Platform-specific implementations should provide this
pub trait AssetLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the decoration catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load configuration data for a specific system
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_config<T>(&self, config_name: &str) -> Result<T, Self::Error>
    where
        T: serde::de::DeserializeOwned;
}

/// Trait for abstracting profile save/load operations
pub trait ProfileStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    fn save_profile(&self, slot: &str, profile: &PlayerProfile) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the profile cannot be loaded.
    fn load_profile(&self, slot: &str) -> Result<Option<PlayerProfile>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the profile cannot be deleted.
    fn delete_profile(&self, slot: &str) -> Result<(), Self::Error>;
}

/// Name passed to [`AssetLoader::load_config`] for [`EconomyConfig`].
pub const ECONOMY_CONFIG_NAME: &str = "economy";

/// Builds sessions and moves profiles in and out of storage.
pub struct SchoolEngine<L, S>
where
    L: AssetLoader,
    S: ProfileStorage,
{
    loader: L,
    storage: S,
}

impl<L, S> SchoolEngine<L, S>
where
    L: AssetLoader,
    S: ProfileStorage,
{
    pub const fn new(loader: L, storage: S) -> Self {
        Self { loader, storage }
    }

    /// Start a session with a fresh profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog or economy config cannot be loaded.
    pub fn create_session(&self) -> Result<SchoolSession, L::Error> {
        let catalog = self.loader.load_catalog()?;
        let config: EconomyConfig = self.loader.load_config(ECONOMY_CONFIG_NAME)?;
        log::info!(
            "new session: {} catalog items, {} starting coins",
            catalog.len(),
            config.starting_coins
        );
        Ok(SchoolSession::new(Arc::new(catalog), &config))
    }

    /// Persist the session's current profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be saved.
    pub fn save_session(&self, slot: &str, session: &SchoolSession) -> Result<(), S::Error> {
        self.storage.save_profile(slot, session.profile())
    }

    /// Resume a saved profile against a freshly loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, the saved profile is invalid, or it
    /// owns items the catalog no longer lists.
    pub fn resume_session(&self, slot: &str) -> Result<Option<SchoolSession>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let Some(profile) = self.storage.load_profile(slot).map_err(Into::into)? else {
            return Ok(None);
        };
        let catalog = self.loader.load_catalog().map_err(Into::into)?;
        let session = SchoolSession::from_profile(Arc::new(catalog), profile)?;
        Ok(Some(session))
    }

    /// # Errors
    ///
    /// Returns an error if the profile cannot be deleted.
    pub fn delete_session(&self, slot: &str) -> Result<(), S::Error> {
        self.storage.delete_profile(slot)
    }
}
