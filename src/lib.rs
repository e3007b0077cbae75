//! DM Operations provisioning library
//!
//! Provisions the `dm_operations` Postgres schema for a fictitious
//! office-supplies operation and seeds it with synthetic but internally
//! consistent demo data: an `inventory` parent table, dependent `sales`
//! and `orders` tables, and three reporting views over them.
//!
//! Two entry points, run in order:
//! - [`schema::initialize`] — idempotent full reset of tables and views
//! - [`seed::seed`] — synthetic row generation plus a summary readback
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod schema;
pub mod seed;
