//! Outbound adapters implementing the catalog's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM
//! - **memory**: in-process repositories for database-less runs
//! - **storage**: filesystem object storage for uploaded images
//! - **auth**: JWT verification of identity service tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod auth;
pub mod memory;
pub mod persistence;
pub mod storage;
