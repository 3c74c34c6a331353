//! Common library for the Findex services
//!
//! This crate provides the shared functionality used across the Findex
//! services: PostgreSQL connection pooling, embedded schema migrations,
//! and the shared database error type.

pub mod database;
pub mod error;
