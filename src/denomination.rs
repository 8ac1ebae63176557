//! Emerald denomination formatting
//!
//! Prices are stored as a raw emerald count. For display they are broken
//! down into stacks (stx), liquid emeralds (le), emerald blocks (eb) and
//! loose emeralds (e).

use std::fmt;

/// Emeralds in one stack of liquid emeralds
pub const EMERALDS_PER_STX: f64 = 262_144.0;

/// Emeralds in one liquid emerald
pub const EMERALDS_PER_LE: f64 = 4_096.0;

/// Emeralds in one emerald block
pub const EMERALDS_PER_EB: f64 = 64.0;

/// A price broken down into display tiers
///
/// Prices worth at least one stack are shown as whole stacks plus a
/// fractional liquid remainder. Anything smaller is shown as liquid,
/// blocks and loose emeralds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denomination {
    /// `{stx}stx, {le:.2}le`
    Stacks { stx: f64, le: f64 },
    /// `{le}le, {eb}eb, {e}e`
    Liquid { le: f64, eb: f64, e: f64 },
}

impl Denomination {
    /// Breaks a price (in emeralds) into denomination tiers
    ///
    /// Accepts fractional prices since location averages are rarely whole.
    pub fn from_emeralds(price: f64) -> Self {
        let stx_leftover = price % EMERALDS_PER_STX;
        let stx = (price - stx_leftover) / EMERALDS_PER_STX;

        if stx >= 1.0 {
            return Denomination::Stacks {
                stx,
                le: stx_leftover / EMERALDS_PER_LE,
            };
        }

        let le_leftover = stx_leftover % EMERALDS_PER_LE;
        let le = (price - le_leftover) / EMERALDS_PER_LE;
        let eb_leftover = le_leftover % EMERALDS_PER_EB;
        let eb = (le_leftover - eb_leftover) / EMERALDS_PER_EB;

        Denomination::Liquid {
            le,
            eb,
            e: eb_leftover,
        }
    }
}

impl From<u64> for Denomination {
    fn from(price: u64) -> Self {
        Denomination::from_emeralds(price as f64)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denomination::Stacks { stx, le } => write!(f, "{:.0}stx, {:.2}le", stx, le),
            Denomination::Liquid { le, eb, e } => write!(f, "{:.0}le, {:.0}eb, {:.0}e", le, eb, e),
        }
    }
}

/// Formats a price (in emeralds) for display
pub fn format_price(price: f64) -> String {
    Denomination::from_emeralds(price).to_string()
}
