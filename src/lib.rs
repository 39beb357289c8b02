//! A roulette that draws participants two at a time until fewer than two remain.

pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod roulette;
pub mod wheel;

pub use error::RouletteError;
pub use roulette::{Group, RouletteEngine, Snapshot, SpinStatus, SpinTicket};
