use crate::locale::values_dir_name;
use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the written resource inside each `values-<locale>` directory.
pub const OUTPUT_FILE_NAME: &str = "translatable.xml";

/// Writes per-locale resource files below a `res` directory.
#[derive(Debug, Clone)]
pub struct ResourceWriter {
    res_dir: PathBuf,
}

impl ResourceWriter {
    pub fn new(res_dir: impl Into<PathBuf>) -> Self {
        Self {
            res_dir: res_dir.into(),
        }
    }

    pub fn res_dir(&self) -> &Path {
        &self.res_dir
    }

    /// Directory holding the resources for `locale`.
    pub fn values_dir(&self, locale: &str) -> PathBuf {
        self.res_dir.join(values_dir_name(locale))
    }

    /// Write `contents` to `values-<locale>/translatable.xml`, replacing any
    /// previous file.
    ///
    /// Only the `values-<locale>` level is created; `res_dir` must exist.
    pub fn write(&self, locale: &str, contents: &str) -> Result<PathBuf> {
        let dir = self.values_dir(locale);
        ensure_dir(&dir)?;

        let path = dir.join(OUTPUT_FILE_NAME);
        fs::write(&path, contents.as_bytes())
            .context(format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(e).context(format!("Failed to create directory {}", dir.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_values_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let writer = ResourceWriter::new(temp_dir.path());

        let path = writer.write("es", "<resources/>\n").expect("Should write");

        assert_eq!(path, temp_dir.path().join("values-es").join("translatable.xml"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<resources/>\n");
    }

    #[test]
    fn test_write_existing_dir_is_fine() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join("values-fr")).unwrap();
        let writer = ResourceWriter::new(temp_dir.path());

        assert!(writer.write("fr", "first").is_ok());
        assert!(writer.write("fr", "second").is_ok());
    }

    #[test]
    fn test_write_overwrites_previous_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let writer = ResourceWriter::new(temp_dir.path());

        writer.write("de", "a much longer first version").unwrap();
        let path = writer.write("de", "short").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "short");
    }

    #[test]
    fn test_write_keeps_utf8() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let writer = ResourceWriter::new(temp_dir.path());

        let path = writer.write("ru", "Музыка …").unwrap();
        assert_eq!(fs::read(path).unwrap(), "Музыка …".as_bytes());
    }

    #[test]
    fn test_write_requires_res_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let writer = ResourceWriter::new(temp_dir.path().join("missing-res"));

        assert!(writer.write("es", "<resources/>").is_err());
        assert!(!temp_dir.path().join("missing-res").exists());
    }

    #[test]
    fn test_write_fails_when_values_path_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(temp_dir.path().join("values-it"), "not a dir").unwrap();
        let writer = ResourceWriter::new(temp_dir.path());

        assert!(writer.write("it", "<resources/>").is_err());
    }
}
