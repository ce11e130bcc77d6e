use crate::archive::TranslationArchive;
use crate::config::Config;
use crate::document::Document;
use crate::fetch::fetch_package;
use crate::locale::{locale_from_entry, remap_locale};
use crate::normalize::normalize;
use crate::writer::ResourceWriter;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// What happened to one translatable entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Written {
        locale: String,
        path: PathBuf,
        removed_plurals: usize,
    },
    /// Nothing left after filtering; no file was written.
    Discarded {
        locale: String,
        removed_plurals: usize,
    },
}

impl EntryOutcome {
    pub fn removed_plurals(&self) -> usize {
        match self {
            EntryOutcome::Written {
                removed_plurals, ..
            }
            | EntryOutcome::Discarded {
                removed_plurals, ..
            } => *removed_plurals,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    pub discarded: Vec<String>,
    pub removed_plurals: usize,
}

/// Parse, filter and (if anything is left) write a single entry.
pub fn process_entry(name: &str, payload: &[u8], writer: &ResourceWriter) -> Result<EntryOutcome> {
    let mut document =
        Document::parse_bytes(payload).context(format!("Failed to parse {}", name))?;

    let normalized = normalize(&mut document);
    let locale = remap_locale(locale_from_entry(name)).to_string();
    let removed_plurals = normalized.removed_plurals;

    if normalized.is_empty {
        debug!("{}: no translations left, skipping {}", name, locale);
        return Ok(EntryOutcome::Discarded {
            locale,
            removed_plurals,
        });
    }

    let path = writer.write(&locale, &document.to_pretty_string())?;
    debug!("{} -> {}", name, path.display());

    Ok(EntryOutcome::Written {
        locale,
        path,
        removed_plurals,
    })
}

/// Write every translatable entry of an in-memory package.
///
/// Entries are handled in archive order and the first failure aborts the run.
pub fn apply_package(bytes: Vec<u8>, writer: &ResourceWriter) -> Result<Summary> {
    let mut archive = TranslationArchive::open(bytes)?;
    let entries = archive.translatable_entries();
    info!("Package contains {} translatable entries", entries.len());

    let mut summary = Summary::default();
    for name in &entries {
        let payload = archive.read_entry(name)?;
        let outcome = process_entry(name, &payload, writer)?;

        summary.removed_plurals += outcome.removed_plurals();
        match outcome {
            EntryOutcome::Written { path, .. } => summary.written.push(path),
            EntryOutcome::Discarded { locale, .. } => summary.discarded.push(locale),
        }
    }

    Ok(summary)
}

/// Download the package and update the resource tree.
pub async fn run(config: &Config) -> Result<Summary> {
    let client = reqwest::Client::new();
    let bytes = fetch_package(&client, &config.package_url).await?;

    let writer = ResourceWriter::new(&config.res_dir);
    let summary = apply_package(bytes, &writer)?;

    info!(
        "Wrote {} locales to {}, skipped {} empty, removed {} incomplete plurals",
        summary.written.len(),
        writer.res_dir().display(),
        summary.discarded.len(),
        summary.removed_plurals
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (ResourceWriter, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        (ResourceWriter::new(temp_dir.path()), temp_dir)
    }

    #[test]
    fn test_process_entry_writes_remapped_locale() {
        let (writer, temp_dir) = setup();

        let outcome = process_entry(
            "es-ES/strings/translatable.xml",
            br#"<resources><string name="a">Hola</string></resources>"#,
            &writer,
        )
        .expect("Should process");

        let expected = temp_dir.path().join("values-es/translatable.xml");
        assert_eq!(
            outcome,
            EntryOutcome::Written {
                locale: "es".to_string(),
                path: expected.clone(),
                removed_plurals: 0,
            }
        );
        assert_eq!(
            fs::read_to_string(expected).unwrap(),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n  <string name=\"a\">Hola</string>\n</resources>\n"
        );
    }

    #[test]
    fn test_process_entry_discards_empty_result() {
        let (writer, temp_dir) = setup();

        let outcome = process_entry(
            "fr/strings/translatable.xml",
            br#"<resources><plurals name="p"><item quantity="one">x</item><item quantity="few">y</item></plurals></resources>"#,
            &writer,
        )
        .expect("Should process");

        assert_eq!(
            outcome,
            EntryOutcome::Discarded {
                locale: "fr".to_string(),
                removed_plurals: 1,
            }
        );
        assert!(!temp_dir.path().join("values-fr").exists());
    }

    #[test]
    fn test_process_entry_discards_whitespace_only_resources() {
        let (writer, temp_dir) = setup();

        let outcome = process_entry(
            "it/translatable.xml",
            b"<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n</resources>\n",
            &writer,
        )
        .expect("Should process");

        assert_eq!(
            outcome,
            EntryOutcome::Discarded {
                locale: "it".to_string(),
                removed_plurals: 0,
            }
        );
        assert!(!temp_dir.path().join("values-it").exists());
    }

    #[test]
    fn test_process_entry_discards_text_only_resources() {
        let (writer, temp_dir) = setup();

        let outcome = process_entry("nl/translatable.xml", b"<resources>stray</resources>", &writer)
            .expect("Should process");

        assert!(matches!(outcome, EntryOutcome::Discarded { .. }));
        assert!(!temp_dir.path().join("values-nl").exists());
    }

    #[test]
    fn test_process_entry_parse_error_names_entry() {
        let (writer, _temp_dir) = setup();

        let err = process_entry("de/translatable.xml", b"<resources><string>", &writer)
            .expect_err("Should fail");
        assert!(format!("{:#}", err).contains("de/translatable.xml"));
    }
}
