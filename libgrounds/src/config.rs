use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::directive::{DirectiveSpec, DirectiveStore};
use crate::document::Document;
use crate::matcher::PatternSet;
use crate::transaction::Transaction;
use crate::{Error, Result};

/// Behavior toggles for the calling surface.
///
/// Unknown settings in the configuration document are ignored; absent ones
/// default to off.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub pause_when_successful: bool,
    #[serde(default)]
    pub open_document: bool,
    #[serde(default)]
    pub open_ledger_file: bool,
}

/// Raw configuration document shape.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    default_ledger_file: PathBuf,
    default_transaction_flag: String,
    patterns: IndexMap<String, String>,
    #[serde(default)]
    settings: Settings,
    groups: IndexMap<String, IndexMap<String, DirectiveSpec>>,
}

/// Loaded configuration: compiled patterns, resolved directives, defaults.
///
/// Built once, immutable afterwards, and shared read-only by every
/// generation request. A pattern group without a `groups` entry is accepted;
/// its captures simply never match a directive.
#[derive(Debug)]
pub struct Config {
    default_ledger_file: PathBuf,
    default_flag: String,
    patterns: PatternSet,
    settings: Settings,
    directives: DirectiveStore,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|err| {
            Error::Config(format!("unable to read `{}': {}", path.display(), err))
        })?;
        Config::from_json(&content)
    }

    /// Parse configuration out of a JSON document.
    pub fn from_json(content: &str) -> Result<Config> {
        let file: ConfigFile =
            serde_json::from_str(content).map_err(|err| Error::Config(err.to_string()))?;

        if file.default_transaction_flag.chars().count() != 1 {
            return Err(Error::Config(format!(
                "default transaction flag `{}' is not a single character",
                file.default_transaction_flag
            )));
        }

        Ok(Config {
            default_ledger_file: file.default_ledger_file,
            default_flag: file.default_transaction_flag,
            patterns: PatternSet::compile(&file.patterns)?,
            settings: file.settings,
            directives: DirectiveStore::from_specs(file.groups)?,
        })
    }

    /// Parse a document's filename into its captured data.
    pub fn parse_filename(&self, filename: &str) -> Result<Document> {
        Document::from_captures(self.patterns.captures(filename)?)
    }

    /// Merge all directives matched by `document` into a transaction.
    pub fn generate(&self, document: &Document) -> Transaction {
        Transaction::create(document, &self.directives, &self.default_flag)
    }

    /// Generate a transaction straight from a document filename.
    pub fn generate_transaction(&self, filename: &str) -> Result<Transaction> {
        let document = self.parse_filename(filename)?;
        Ok(self.generate(&document))
    }

    /// The ledger file transactions for `document` should be appended to.
    /// Today every document answers the configured default.
    pub fn ledger_file_for(&self, _document: &Document) -> &Path {
        &self.default_ledger_file
    }

    pub fn default_ledger_file(&self) -> &Path {
        &self.default_ledger_file
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
