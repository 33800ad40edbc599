//! Data access layer for the Gametime web game portal.
//!
//! Mediates all persistent state (users, per-game scores, forum threads and
//! replies) behind a small fixed set of async operations against Postgres.
//! The HTTP layer and game front end sit above this crate and are not part
//! of it.

pub mod config;
pub mod db;

pub use db::error::DbError;
