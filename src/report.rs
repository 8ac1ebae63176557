//! Lootpool price report
//!
//! Averages the mythic prices of every location in the lootpool and picks
//! the location worth running this week.

use std::io::{self, Write};

use tracing::warn;

use crate::data::{LootDocument, PriceTable};
use crate::denomination::{format_price, Denomination};

/// A mythic and its listed price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    pub name: String,
    pub price: u64,
}

/// Prices for one location
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSummary {
    /// Location name as it appears in the lootpool
    pub name: String,
    /// Mythics found in the price list, in lootpool order
    pub priced: Vec<PricedItem>,
    /// Mythics missing from the price list
    pub unknown: Vec<String>,
}

impl LocationSummary {
    /// Mean price of the priced mythics
    ///
    /// `None` when no mythic at this location has a price.
    pub fn average(&self) -> Option<f64> {
        if self.priced.is_empty() {
            return None;
        }
        let total: u128 = self.priced.iter().map(|item| u128::from(item.price)).sum();
        Some(total as f64 / self.priced.len() as f64)
    }
}

/// The location with the best average
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub location: String,
    pub average: f64,
}

/// Options that change what the report prints
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Print every priced mythic under its location
    pub show_items: bool,
}

/// Per-location averages for a lootpool
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub locations: Vec<LocationSummary>,
}

impl Report {
    /// Prices every location in the lootpool
    ///
    /// Mythics missing from the price list are logged and left out of the
    /// average rather than counted as zero.
    pub fn build(lootpool: &LootDocument, prices: &PriceTable) -> Self {
        let locations = lootpool
            .locations()
            .map(|location| {
                let mut summary = LocationSummary {
                    name: location.name.clone(),
                    priced: Vec::new(),
                    unknown: Vec::new(),
                };

                for mythic in &location.loot.mythic {
                    match prices.price_of(mythic) {
                        Some(price) => summary.priced.push(PricedItem {
                            name: mythic.clone(),
                            price,
                        }),
                        None => {
                            warn!(location = %location.name, "Mythic {} not in pricelist", mythic);
                            summary.unknown.push(mythic.clone());
                        }
                    }
                }

                if summary.priced.is_empty() {
                    warn!("No priced mythics for {}", location.name);
                }

                summary
            })
            .collect();

        Self { locations }
    }

    /// Picks the location with the highest average
    ///
    /// Only a strictly greater average replaces the current pick, so the
    /// first location wins a tie. Locations without priced mythics are
    /// never picked, and neither is an average of zero.
    pub fn recommendation(&self) -> Option<Recommendation> {
        let mut best: Option<Recommendation> = None;

        for location in &self.locations {
            let Some(average) = location.average() else {
                continue;
            };
            let current = best.as_ref().map_or(0.0, |b| b.average);
            if average > current {
                best = Some(Recommendation {
                    location: location.name.clone(),
                    average,
                });
            }
        }

        best
    }

    /// Writes the human-readable report
    pub fn write_to<W: Write>(&self, out: &mut W, options: ReportOptions) -> io::Result<()> {
        for location in &self.locations {
            writeln!(out, "{} Lootpool:", location.name)?;

            if options.show_items {
                for item in &location.priced {
                    writeln!(
                        out,
                        "{} Price: {} (Unidentified)",
                        item.name,
                        Denomination::from(item.price)
                    )?;
                }
            }

            match location.average() {
                Some(average) => writeln!(
                    out,
                    "Average price for {} mythics (Excluding Shinies) is {}",
                    location.name,
                    format_price(average)
                )?,
                None => writeln!(out, "No priced mythics for {}", location.name)?,
            }
        }

        match self.recommendation() {
            Some(best) => {
                writeln!(out, "Based on the average mythic price for this week's lootpool,")?;
                writeln!(
                    out,
                    "It is recommended that you run {} with average mythic price of {}.",
                    best.location,
                    format_price(best.average)
                )?;
            }
            None => writeln!(out, "No location has priced mythics this week.")?,
        }

        Ok(())
    }
}
