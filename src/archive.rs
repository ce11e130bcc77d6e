use anyhow::{Context, Result};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Entries ending with this name carry translatable strings for one locale.
pub const TRANSLATABLE_SUFFIX: &str = "translatable.xml";

/// An in-memory translation package.
pub struct TranslationArchive {
    zip: ZipArchive<Cursor<Vec<u8>>>,
}

impl TranslationArchive {
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let zip = ZipArchive::new(Cursor::new(bytes))
            .context("Translation package is not a valid zip archive")?;
        Ok(Self { zip })
    }

    /// All entry names, in archive order.
    pub fn entry_names(&self) -> Vec<String> {
        (0..self.zip.len())
            .filter_map(|index| self.zip.name_for_index(index))
            .map(str::to_string)
            .collect()
    }

    /// Entry names ending with [`TRANSLATABLE_SUFFIX`], in archive order.
    /// Directory markers and any other files are left out.
    pub fn translatable_entries(&self) -> Vec<String> {
        self.entry_names()
            .into_iter()
            .filter(|name| is_translatable(name))
            .collect()
    }

    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut file = self
            .zip
            .by_name(name)
            .context(format!("Archive entry {} not found", name))?;

        let mut payload = Vec::new();
        file.read_to_end(&mut payload)
            .context(format!("Failed to read archive entry {}", name))?;
        Ok(payload)
    }
}

pub fn is_translatable(name: &str) -> bool {
    name.ends_with(TRANSLATABLE_SUFFIX)
}
