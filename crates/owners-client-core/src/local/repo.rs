//! Access to the files of a repository snapshot.

use std::io;
use std::path::PathBuf;

/// Reads files of a repository by repository-relative path.
///
/// Paths use `/` separators and never start with one.
pub trait RepoReader: Send + Sync {
    /// Returns true if `path` names a regular file.
    fn exists(&self, path: &str) -> bool;

    /// Reads a text file, or `Ok(None)` if it does not exist.
    fn read_to_string(&self, path: &str) -> io::Result<Option<String>>;
}

/// A [`RepoReader`] over a checkout on disk.
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_matches('/'))
    }
}

impl RepoReader for FsRepository {
    fn exists(&self, path: &str) -> bool {
        self.full_path(path).is_file()
    }

    fn read_to_string(&self, path: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.full_path(path)) {
            Ok(content) => Ok(Some(content)),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_files_relative_to_root() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src/OWNERS"), "dev@example.com\n").unwrap();

        let repo = FsRepository::new(temp_dir.path());
        assert!(repo.exists("src/OWNERS"));
        assert!(repo.exists("/src/OWNERS"));
        assert_eq!(
            repo.read_to_string("src/OWNERS").unwrap().as_deref(),
            Some("dev@example.com\n")
        );
    }

    #[test]
    fn missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FsRepository::new(temp_dir.path());
        assert!(!repo.exists("OWNERS"));
        assert!(repo.read_to_string("OWNERS").unwrap().is_none());
        assert!(repo.read_to_string("no/such/dir/OWNERS").unwrap().is_none());

        fs::write(temp_dir.path().join("main.rs"), "").unwrap();
        assert!(repo.read_to_string("main.rs/OWNERS").unwrap().is_none());
    }

    #[test]
    fn directories_do_not_exist_as_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("OWNERS")).unwrap();
        let repo = FsRepository::new(temp_dir.path());
        assert!(!repo.exists("OWNERS"));
    }
}
