//! Configuration for the movies migration.
//!
//! Settings are read from the environment (a `.env` file is loaded by the
//! binary first) and turned into ready-to-run components.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{PostgresSettings, Settings};
