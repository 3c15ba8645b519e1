//! Configuration artifact handling.
//!
//! - [`env_file`] - `.env` parsing in the standard KEY=value format
//! - [`materializer`] - ensuring the `.env` artifact exists

pub mod env_file;
pub mod materializer;

pub use env_file::EnvFileParser;
pub use materializer::{ensure, ENV_FILE, KEY_DATABASE_URL, KEY_NODE_ENV, KEY_STRIPE_SECRET};
