//! Decoration catalog and shop lookups
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use thiserror::Error;

use crate::constants::ITEM_ID_PATTERN;

/// Shop shelf an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Hats,
    Accessories,
    Special,
}

impl ItemCategory {
    pub const ALL: [Self; 3] = [Self::Hats, Self::Accessories, Self::Special];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hats => "hats",
            Self::Accessories => "accessories",
            Self::Special => "special",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single decoration available in the shop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogItem {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    /// Price in coins, always positive
    pub price: u32,
    pub category: ItemCategory,
    /// Glyph rendered on the avatar when the decoration is equipped
    pub icon: String,
}

impl CatalogItem {
    fn new(
        id: &str,
        display_name: &str,
        icon: &str,
        price: u32,
        category: ItemCategory,
        description: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            price,
            category,
            icon: icon.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("item id `{0}` appears more than once")]
    DuplicateId(String),
    #[error("item `{0}` must have a positive price")]
    ZeroPrice(String),
    #[error("item id `{0}` must be lowercase ascii, digits, `-` or `_`")]
    InvalidId(String),
}

/// Immutable list of purchasable decorations.
///
/// Deserializing goes through [`Catalog::new`], so every catalog in memory has
/// unique well-formed ids and positive prices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(try_from = "RawCatalog")]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

#[derive(Deserialize)]
struct RawCatalog {
    items: Vec<CatalogItem>,
}

impl TryFrom<RawCatalog> for Catalog {
    type Error = CatalogError;

    fn try_from(raw: RawCatalog) -> Result<Self, Self::Error> {
        Self::new(raw.items)
    }
}

static STANDARD: Lazy<Catalog> = Lazy::new(|| {
    use ItemCategory::{Accessories, Hats, Special};
    Catalog {
        items: vec![
            CatalogItem::new(
                "crown",
                "Kruunu",
                "👑",
                100,
                Hats,
                "Koulun kunkulle tai kuningattarelle!",
            ),
            CatalogItem::new("tophat", "Silinteri", "🎩", 75, Hats, "Klassinen valinta"),
            CatalogItem::new("cap", "Lippis", "🧢", 50, Hats, "Urheilullinen"),
            CatalogItem::new("party", "Juhlahattu", "🎉", 60, Hats, "Aina valmiina juhlaan!"),
            CatalogItem::new("wizard", "Velhon hattu", "🧙", 90, Hats, "Maaginen ja mystinen"),
            CatalogItem::new("star", "Tähti", "⭐", 80, Accessories, "Olet tähtioppilas!"),
            CatalogItem::new("sparkle", "Glitter", "✨", 70, Accessories, "Vähän kimalletta!"),
            CatalogItem::new("fire", "Tuliefekti", "🔥", 85, Accessories, "Sä oot lit!"),
            CatalogItem::new("heart", "Sydämet", "💖", 65, Accessories, "Lisää rakkautta"),
            CatalogItem::new(
                "lightning",
                "Salama",
                "⚡",
                95,
                Accessories,
                "Sähköistävä vaihtoehto!",
            ),
            CatalogItem::new(
                "rainbow",
                "Sateenkaari",
                "🌈",
                120,
                Special,
                "Ultra-harvinainen sateenkaariefekti!",
            ),
            CatalogItem::new("trophy", "Palkinto", "🏆", 150, Special, "Voittajan valinta"),
            CatalogItem::new("medal", "Kultamitali", "🥇", 130, Special, "Eka!"),
            CatalogItem::new("rocket", "Raketti", "🚀", 140, Special, "Tavoittele tähtiin!"),
            CatalogItem::new(
                "diamond",
                "Timantti",
                "💎",
                200,
                Special,
                "Legendaarinen koristus!",
            ),
        ],
    }
});

static ITEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(ITEM_ID_PATTERN).expect("item id pattern is valid"));

impl Catalog {
    /// The built-in decoration shop.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Build a catalog from items, rejecting duplicates and malformed entries.
    ///
    /// # Errors
    ///
    /// Returns an error if an id is repeated or malformed, or a price is zero.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        Self::validate(&items)?;
        Ok(Self { items })
    }

    fn validate(items: &[CatalogItem]) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for item in items {
            if !ITEM_ID.is_match(&item.id) {
                return Err(CatalogError::InvalidId(item.id.clone()));
            }
            if item.price == 0 {
                return Err(CatalogError::ZeroPrice(item.id.clone()));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
        }
        Ok(())
    }

    /// Load a catalog from a JSON asset of the form `{"items": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn find_item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Items on a shelf, or every item when `category` is `None`.
    pub fn by_category(
        &self,
        category: Option<ItemCategory>,
    ) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.items
            .iter()
            .filter(move |item| category.is_none_or(|c| item.category == c))
    }

    /// Get all items as a flat map by ID.
    #[must_use]
    pub fn items_by_id(&self) -> HashMap<&str, &CatalogItem> {
        self.items
            .iter()
            .map(|item| (item.id.as_str(), item))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
