//! Local date-partitioned store for generated files.
//!
//! Objects live under `root/YYYY/MM/DD/filename` and are addressed by their
//! relative object name, e.g. `2024/03/07/report.docx`.

use crate::convert::object_name;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::{Component, Path, PathBuf};

const PARTIAL_SUFFIX: &str = ".part";

/// A directory holding generated files partitioned by date.
#[derive(Debug, Clone)]
pub struct DatedStore {
    root: PathBuf,
}

impl DatedStore {
    /// Open a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store `bytes` as `filename` in the partition for `date`.
    ///
    /// The data is written to a scratch file first and renamed into place,
    /// so readers never observe a partially written object.
    /// Returns the object name.
    pub fn put(&self, filename: &str, bytes: &[u8], date: NaiveDate) -> Result<String> {
        if filename.is_empty() || filename.contains('/') || filename.contains('\\') {
            return Err(Error::InvalidObjectName(filename.to_string()));
        }
        let name = object_name(filename, date);
        let path = self.resolve(&name)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut scratch = path.clone().into_os_string();
        scratch.push(PARTIAL_SUFFIX);
        let scratch = PathBuf::from(scratch);
        let written = fs::write(&scratch, bytes).and_then(|()| fs::rename(&scratch, &path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&scratch) {
                log::debug!("Could not remove {}: {}", scratch.display(), cleanup);
            }
            return Err(e.into());
        }

        log::debug!("Stored {} ({} bytes)", name, bytes.len());
        Ok(name)
    }

    /// Read a stored object.
    pub fn get(&self, object_name: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(object_name)?)?)
    }

    /// Map an object name to its path inside the store.
    ///
    /// Absolute names and names with `..` components are rejected.
    pub fn resolve(&self, object_name: &str) -> Result<PathBuf> {
        let invalid = || Error::InvalidObjectName(object_name.to_string());
        if object_name.is_empty() || object_name.starts_with('/') || object_name.starts_with('\\') {
            return Err(invalid());
        }

        let mut path = self.root.clone();
        for component in Path::new(object_name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid())
                }
            }
        }
        if path == self.root {
            return Err(invalid());
        }
        Ok(path)
    }

    /// Object names starting with `prefix`, sorted.
    pub fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if self.root.is_dir() {
            collect_names(&self.root, "", &mut names)?;
        }
        names.retain(|name| name.starts_with(prefix));
        names.sort();
        Ok(names)
    }
}

fn collect_names(dir: &Path, relative: &str, names: &mut Vec<String>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        let name = if relative.is_empty() {
            file_name
        } else {
            format!("{}/{}", relative, file_name)
        };

        if entry.file_type()?.is_dir() {
            collect_names(&entry.path(), &name, names)?;
        } else if !name.ends_with(PARTIAL_SUFFIX) {
            names.push(name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let dir = TempDir::new().unwrap();
        let store = DatedStore::new(dir.path());

        let name = store.put("report.docx", b"bytes", date(7)).unwrap();
        assert_eq!(name, "2024/03/07/report.docx");
        assert!(dir.path().join("2024/03/07/report.docx").is_file());
        assert_eq!(store.get(&name).unwrap(), b"bytes");
    }

    #[test]
    fn test_resolve_rejects_escapes() {
        let store = DatedStore::new("/tmp/store");
        for name in ["../etc/passwd", "2024/../../x", "/abs/path", "", "."] {
            assert!(
                matches!(store.resolve(name), Err(Error::InvalidObjectName(_))),
                "{} should be rejected",
                name
            );
        }
        assert!(store.resolve("2024/01/02/a.xlsx").is_ok());
    }

    #[test]
    fn test_put_rejects_nested_filename() {
        let dir = TempDir::new().unwrap();
        let store = DatedStore::new(dir.path());
        assert!(store.put("../x.docx", b"", date(1)).is_err());
    }

    #[test]
    fn test_list_sorted_with_prefix() {
        let dir = TempDir::new().unwrap();
        let store = DatedStore::new(dir.path());
        store.put("b.xlsx", b"1", date(8)).unwrap();
        store.put("a.docx", b"2", date(8)).unwrap();
        store.put("c.pptx", b"3", date(7)).unwrap();

        assert_eq!(
            store.list("").unwrap(),
            vec!["2024/03/07/c.pptx", "2024/03/08/a.docx", "2024/03/08/b.xlsx"]
        );
        assert_eq!(store.list("2024/03/08").unwrap().len(), 2);
    }

    #[test]
    fn test_failed_put_leaves_no_scratch_file() {
        let dir = TempDir::new().unwrap();
        let store = DatedStore::new(dir.path());
        // a directory in the way makes the final rename fail
        fs::create_dir_all(dir.path().join("2024/03/09/taken.docx/inner")).unwrap();

        assert!(matches!(
            store.put("taken.docx", b"data", date(9)),
            Err(Error::Io(_))
        ));
        assert!(!dir.path().join("2024/03/09/taken.docx.part").exists());
        assert_eq!(store.list("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_list_missing_root() {
        let store = DatedStore::new("/nonexistent/officemark-store");
        assert!(store.list("").unwrap().is_empty());
    }
}
