//! SQLite storage for the shipment tracking engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
