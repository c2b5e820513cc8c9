//! Database module for SQLite operations.
//!
//! This module provides:
//! - Database initialization and schema setup
//! - SQLite pragma configuration
//! - Repository layer for category and question rows

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
