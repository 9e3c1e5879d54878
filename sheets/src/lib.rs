//! Google Sheets write client.
//!
//! This crate is the single source of truth for the spreadsheet wire
//! contract: service-account auth, open spreadsheet by name, worksheet
//! lookup, single-cell write.
//!
//! No terminal concepts. No retries. No caching of anything.

mod auth;
mod cell;
mod client;
mod error;
mod writer;

pub use auth::{AccessToken, ServiceAccountKey, SCOPES};
pub use cell::CellRef;
pub use client::{SheetsApi, SheetsClient};
pub use error::{ResourceKind, SheetError};
pub use writer::{WriteTask, write_value};
