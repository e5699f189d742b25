//! PostgreSQL integration for Maquette.
//!
//! Implements the [`maquette_core::GenerationLedger`] contract over Diesel:
//! job rows track lifecycle and progress, asset rows are append-only metadata
//! envelopes, and rendition rows carry the base64 payloads inline.

#![forbid(unsafe_code)]

mod connection;
mod ledger;
mod models;
pub mod schema;

pub use connection::establish_connection;
pub use ledger::PostgresLedger;
pub use models::{AssetRow, JobRow, NewAssetRow, NewJobRow, NewRenditionRow, RenditionRow};
