//! CLI Commands

pub mod generate;
pub mod reports;
