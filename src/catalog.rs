//! Local cache of supported currencies backing input validation.
//!
//! The catalog is fetched once per process, persisted to a flat text file as
//! `CODE=NAME` lines sorted by code, and kept in memory for lookups. Once
//! written, the file is the source of truth for "supported" until the
//! process exits.

use crate::listing_provider::CurrencyListProvider;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DELIMITER: char = '=';

/// The fixed rejection message for codes missing from the catalog.
pub fn unsupported_message(code: &str) -> String {
    format!("The currency {code} is not supported.")
}

#[derive(Debug)]
pub struct CurrencyCatalog {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl CurrencyCatalog {
    /// Fetches the supported-currency set and persists it, replacing any
    /// previous cache file.
    pub async fn sync(provider: &dyn CurrencyListProvider, path: &Path) -> Result<Self> {
        let listed = provider.list_currencies().await?;

        let entries: BTreeMap<String, String> = listed
            .into_iter()
            .map(|entry| (entry.code, entry.name))
            .collect();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut contents = String::new();
        for (code, name) in &entries {
            contents.push_str(code);
            contents.push(DELIMITER);
            contents.push_str(name);
            contents.push('\n');
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write currency cache file {}", path.display()))?;

        debug!(
            "Cached {} supported currencies at {}",
            entries.len(),
            path.display()
        );

        Ok(CurrencyCatalog {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Loads a previously written cache file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read currency cache file {}", path.display()))?;

        let mut entries = BTreeMap::new();
        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            let (code, name) = line.split_once(DELIMITER).with_context(|| {
                format!("Malformed line in currency cache file {}: '{line}'", path.display())
            })?;
            entries.insert(code.to_string(), name.to_string());
        }

        Ok(CurrencyCatalog {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Whether `code` names a supported currency. The input is uppercased
    /// before the lookup.
    pub fn is_supported(&self, code: &str) -> bool {
        self.entries.contains_key(&code.to_uppercase())
    }

    /// Supported currencies in ascending code order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, name)| (code.as_str(), name.as_str()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
