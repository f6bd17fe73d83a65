//! Core engine for zet, a Zettelkasten note manager.
//!
//! A zettelkasten is a directory of timestamped note directories, each
//! holding a `README.md` (and optionally other `.md` files). This crate
//! keeps an SQLite catalog with an FTS5 shadow index in sync with that
//! tree and builds search, listing, and structural note operations on
//! top of it.

pub mod config;
pub mod db;
pub mod error;
pub mod list;
pub mod logging;
pub mod meta;
pub mod note;
pub mod ops;
pub mod sync;

pub use config::Config;
pub use db::Storage;
pub use error::{ExitCode, Result, ZetError};
