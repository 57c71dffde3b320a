//! # Advertisement Data Layer
//!
//! SeaORM entities, repositories and migrations for advertisements,
//! categories, brands and the users that own them.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod slug;
pub mod telemetry;
pub use migration;
