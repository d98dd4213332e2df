//! Avatar color palettes.
//!
//! Every appearance field is a closed enumeration, so a [`PlayerProfile`]
//! can never hold a color outside its palette. Hosts that only have a
//! string (a form value, a saved preference) go through
//! [`AppearanceChoice::parse`], which is the one place invalid input is
//! rejected.
//!
//! [`PlayerProfile`]: crate::profile::PlayerProfile

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::economy::EconomyError;

macro_rules! palette {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn key(self) -> &'static str {
                match self {
                    $(Self::$variant => $key),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.key().eq_ignore_ascii_case(needle))
                    .ok_or(())
            }
        }
    };
}

palette!(
    /// Hair swatches offered by the avatar editor.
    HairColor {
        Black => "black",
        Brown => "brown",
        Blonde => "blonde",
        Red => "red",
        Cyan => "cyan",
        Purple => "purple",
        Orange => "orange",
        Green => "green",
    }
);

palette!(
    /// Shirt swatches offered by the avatar editor.
    ShirtColor {
        Pink => "pink",
        Blue => "blue",
        Green => "green",
        Yellow => "yellow",
        Purple => "purple",
        Orange => "orange",
        Cyan => "cyan",
        Black => "black",
        White => "white",
    }
);

palette!(
    SkinTone {
        Light => "light",
        Fair => "fair",
        Medium => "medium",
        Tan => "tan",
        Deep => "deep",
    }
);

/// Which appearance slot a choice targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppearanceField {
    Hair,
    Shirt,
    Skin,
}

impl AppearanceField {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hair => "hair",
            Self::Shirt => "shirt",
            Self::Skin => "skin",
        }
    }
}

impl fmt::Display for AppearanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single palette pick for one appearance slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum AppearanceChoice {
    Hair(HairColor),
    Shirt(ShirtColor),
    Skin(SkinTone),
}

impl AppearanceChoice {
    #[must_use]
    pub const fn field(self) -> AppearanceField {
        match self {
            Self::Hair(_) => AppearanceField::Hair,
            Self::Shirt(_) => AppearanceField::Shirt,
            Self::Skin(_) => AppearanceField::Skin,
        }
    }

    /// Resolve a string value against the palette of `field`.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::InvalidOption`] when `value` is not one of the
    /// field's palette entries.
    pub fn parse(field: AppearanceField, value: &str) -> Result<Self, EconomyError> {
        let parsed = match field {
            AppearanceField::Hair => value.parse().map(Self::Hair),
            AppearanceField::Shirt => value.parse().map(Self::Shirt),
            AppearanceField::Skin => value.parse().map(Self::Skin),
        };
        parsed.map_err(|()| EconomyError::InvalidOption {
            field,
            value: value.to_string(),
        })
    }
}

/// Cosmetic look of the student's avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Appearance {
    pub hair: HairColor,
    pub shirt: ShirtColor,
    pub skin: SkinTone,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            hair: HairColor::Black,
            shirt: ShirtColor::Blue,
            skin: SkinTone::Medium,
        }
    }
}

impl Appearance {
    /// Return a copy with one slot overwritten.
    #[must_use]
    pub const fn with(self, choice: AppearanceChoice) -> Self {
        let mut next = self;
        match choice {
            AppearanceChoice::Hair(hair) => next.hair = hair,
            AppearanceChoice::Shirt(shirt) => next.shirt = shirt,
            AppearanceChoice::Skin(skin) => next.skin = skin,
        }
        next
    }
}
