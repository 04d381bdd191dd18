//! Strongly-typed value objects used by domain entities.
//!
//! Filter values are closed enumerations parsed case-insensitively, so a
//! typo in a query string becomes a constraint error instead of a filter that
//! silently matches nothing.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided value is not one of the known variants.
    #[error("unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `u32` backing this identifier.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Macro to generate closed string enumerations with case-insensitive parsing.
macro_rules! string_enum {
    ($name:ident, $kind:literal, $doc:expr, { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical lower-case representation.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let trimmed = value.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|variant| variant.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| TypeConstraintError::UnknownVariant {
                        kind: $kind,
                        value: trimmed.to_string(),
                    })
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

id_newtype!(ImageId, "Unique identifier for a catalog image.");

string_enum!(Category, "category", "Subject category of an image.", {
    Nature => "nature",
    Technology => "technology",
    Architecture => "architecture",
    Food => "food",
    Travel => "travel",
    Animals => "animals",
    People => "people",
    Business => "business",
});

string_enum!(Orientation, "orientation", "Aspect of an image.", {
    Horizontal => "horizontal",
    Vertical => "vertical",
    Square => "square",
});

string_enum!(SizeFilter, "size", "Requested image size bucket.", {
    Large => "large",
    Medium => "medium",
    Small => "small",
});

string_enum!(Platform, "platform", "Client platform, which fixes the page size.", {
    Desktop => "desktop",
    Mobile => "mobile",
});

string_enum!(ViewMode, "view", "Gallery layout.", {
    Grid => "grid",
    List => "list",
});

impl Orientation {
    /// Full-size pixel dimensions (width, height) used by the catalog.
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Orientation::Horizontal => (1920, 1080),
            Orientation::Vertical => (1080, 1920),
            Orientation::Square => (1080, 1080),
        }
    }
}

impl Platform {
    /// Guesses the platform from a `User-Agent` header value.
    pub fn detect(user_agent: &str) -> Self {
        if user_agent.contains("Mobi") {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}

/// Trimmed free-text query. Empty means "no text filter".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub struct SearchText {
    raw: String,
    needle: String,
}

impl SearchText {
    /// Trims the input and prepares a lower-cased needle for matching.
    pub fn new<S: Into<String>>(value: S) -> Self {
        let raw = value.into().trim().to_string();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Borrow the trimmed query as typed by the user.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Case-insensitive substring test. An empty query matches everything.
    pub fn matches(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }
}

impl Display for SearchText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<String> for SearchText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SearchText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SearchText> for String {
    fn from(value: SearchText) -> Self {
        value.raw
    }
}
