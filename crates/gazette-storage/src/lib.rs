// SPDX-FileCopyrightText: 2026 Gazette Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for personas.
//!
//! A single `tokio-rusqlite` connection serializes every statement on its
//! background thread, so each append is atomic and creation order is the
//! row order.

pub mod database;
pub mod store;

pub use database::Database;
pub use store::SqlitePersonaStore;
