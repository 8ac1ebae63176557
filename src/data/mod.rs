//! Core data models for pricecheck
//!
//! This module contains the lootpool document served by the Nori API, the
//! mythic price list, and the client used to download the lootpool.

pub mod nori;
pub mod prices;

pub use nori::{FetchOutcome, NoriClient, NoriError};
pub use prices::{PriceListError, PriceTable};

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;

/// The weekly lootpool as served by `/api/lootpool`
///
/// Locations keep the order in which they appear in the document, which
/// decides ties when picking the best location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LootDocument {
    /// Lootrun camps and their rewards
    #[serde(rename = "Loot")]
    pub loot: LocationList,
}

impl LootDocument {
    /// Parses a lootpool document from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Iterates over the locations in document order
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.loot.0.iter()
    }
}

/// Rewards for a single lootrun location
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LocationLoot {
    /// Names of the mythic items in this week's pool
    #[serde(rename = "Mythic", default)]
    pub mythic: Vec<String>,
}

/// A named location and its loot
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub loot: LocationLoot,
}

/// Locations in the order they were read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationList(pub Vec<Location>);

impl<'de> Deserialize<'de> for LocationList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LocationListVisitor;

        impl<'de> Visitor<'de> for LocationListVisitor {
            type Value = LocationList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of location names to loot")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut locations = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, loot)) = map.next_entry::<String, LocationLoot>()? {
                    if locations.iter().any(|l: &Location| l.name == name) {
                        return Err(de::Error::custom(format!("duplicate location `{}`", name)));
                    }
                    locations.push(Location { name, loot });
                }
                Ok(LocationList(locations))
            }
        }

        deserializer.deserialize_map(LocationListVisitor)
    }
}
