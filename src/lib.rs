//! pricecheck library
//!
//! Exposes the lootpool download, price lookup and report so they can be
//! driven from integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod denomination;
pub mod logging;
pub mod report;
