//! # Battlefield Squads
//!
//! Squad and position assignment for Battlefield esports tournaments.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, squads, positions, tiers)
//! - **assignment**: Pure assignment engine, validation and mode templates
//! - **roster**: Tournament-level auto and manual assignment workflow
//! - **storage**: Filesystem data lake (JSONL) for rosters and results
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod assignment;
pub mod config;
pub mod models;
pub mod roster;
pub mod storage;

pub use models::*;
