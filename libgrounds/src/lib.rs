//! Grounds - a ledger transaction generator for scanned documents
//! ---
//!
//! Inspired by [Beancount](https://beancount.github.io), grounds derives a ledger
//! transaction from the name of a document file, e.g. an invoice or a receipt.
//! Named patterns capture values out of the filename, each captured value may name
//! a partial directive in the configuration, and all matching directives are
//! merged into one transaction ready to append to a ledger file.

/// Configuration loading and the transaction-generation entrypoint.
///
/// The main structure is [`Config`][config::Config], which owns the compiled
/// patterns and the [`DirectiveStore`][directive::DirectiveStore], both built
/// once at load time and shared read-only by every generation request.
pub mod config;

/// Partial directives and the two-level store they are looked up in.
pub mod directive;

/// Data captured out of one document filename.
pub mod document;

mod amount;
mod matcher;
mod resolver;
mod transaction;

pub use amount::{Amount, CostSpec};
pub use config::Config;
pub use transaction::{Posting, Transaction};

use thiserror::Error;

/// Errors raised by the generation pipeline.
///
/// Every failure propagates to the caller from the point of detection; a
/// malformed filename or configuration never yields a partial transaction.
#[derive(Debug, Error)]
pub enum Error {
    /// The filename matched no configured pattern, or a captured value could
    /// not be parsed into the shape its group requires.
    #[error("parse error: {0}")]
    Parse(String),

    /// A mandatory capture group is missing from the filename.
    #[error("validation error: {0}")]
    Validation(String),

    /// The configuration document is missing required keys or holds a value
    /// of the wrong shape.
    #[error("config error: {0}")]
    Config(String),

    /// A cost specification with neither a per-unit nor a total amount.
    #[error("cost specification has neither per-unit nor total amount")]
    CostSpec,
}

pub type Result<T> = std::result::Result<T, Error>;
