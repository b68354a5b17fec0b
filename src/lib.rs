//! # Lobby Stats
//!
//! Battle-royale tournament analytics over lobby scoreboards.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (match records, keys, derived stats)
//! - **calculate**: Statistics engine (aggregates, compositions, team, rankings)
//! - **storage**: Score file discovery and loading
//! - **api**: Read-only REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
