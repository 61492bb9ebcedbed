//! Local puzzle input store
//!
//! Inputs are plain files. A run either points at one explicit file or at a
//! directory laid out as `{dir}/{year}_day{day:02}.txt`.

use crate::config::InputSource;
use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-based store for puzzle inputs
pub struct InputStore {
    source: InputSource,
}

impl InputStore {
    pub fn new(source: InputSource) -> Self {
        Self { source }
    }

    /// File name used for a year/day inside an input directory
    pub fn file_name(year: u16, day: u8) -> String {
        format!("{}_day{:02}.txt", year, day)
    }

    /// Path the input for `year`/`day` is read from
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.source {
            InputSource::File(path) => path.clone(),
            InputSource::Dir(dir) => dir.join(Self::file_name(year, day)),
        }
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read an input, `None` when the file does not exist
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.input_path(year, day);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(InputError::Read { path, source }),
        }
    }

    /// Write an input, creating the parent directory when needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<(), InputError> {
        let path = self.input_path(year, day);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                InputError::DirCreation(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(&path, input).map_err(|source| InputError::Write { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(InputSource::Dir(temp.path().to_path_buf()));

        assert_eq!(
            store.input_path(2020, 1),
            temp.path().join("2020_day01.txt")
        );
        assert_eq!(
            store.input_path(2020, 25),
            temp.path().join("2020_day25.txt")
        );
    }

    #[test]
    fn test_explicit_file_ignores_year_day() {
        let store = InputStore::new(InputSource::File(PathBuf::from("puzzle.txt")));
        assert_eq!(store.input_path(2020, 1), PathBuf::from("puzzle.txt"));
        assert_eq!(store.input_path(2021, 9), PathBuf::from("puzzle.txt"));
    }

    #[test]
    fn test_store_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(InputSource::Dir(temp.path().join("nested")));

        assert!(!store.contains(2020, 1));
        assert!(store.get(2020, 1).unwrap().is_none());

        let input = "1721\n979\n366\n";
        store.put(2020, 1, input).unwrap();

        assert!(store.contains(2020, 1));
        assert_eq!(store.get(2020, 1).unwrap(), Some(input.to_string()));
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2020_day02.txt")).unwrap();
        let store = InputStore::new(InputSource::Dir(temp.path().to_path_buf()));

        assert!(!store.contains(2020, 2));
        assert!(matches!(store.get(2020, 2), Err(InputError::Read { .. })));
    }
}
