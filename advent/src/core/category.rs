//! Almanac categories: the numeric axes conversions map between.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A named numeric axis, listed in the order the almanac chains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Seed,
    Soil,
    Fertilizer,
    Water,
    Light,
    Temperature,
    Humidity,
    Location,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Seed,
        Category::Soil,
        Category::Fertilizer,
        Category::Water,
        Category::Light,
        Category::Temperature,
        Category::Humidity,
        Category::Location,
    ];

    /// Lowercase name as written in map headers.
    pub fn name(self) -> &'static str {
        match self {
            Category::Seed => "seed",
            Category::Soil => "soil",
            Category::Fertilizer => "fertilizer",
            Category::Water => "water",
            Category::Light => "light",
            Category::Temperature => "temperature",
            Category::Humidity => "humidity",
            Category::Location => "location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
