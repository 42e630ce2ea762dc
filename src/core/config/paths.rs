use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem layout derived from the persistence directory.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub db_path: PathBuf,
}

impl AppPaths {
    pub fn new(persist_dir: &Path) -> Self {
        let data_dir = persist_dir.to_path_buf();
        let log_dir = data_dir.join("logs");
        let db_path = data_dir.join("solvex_rag.db");

        for dir in [&data_dir, &log_dir] {
            let _ = fs::create_dir_all(dir);
        }

        AppPaths {
            data_dir,
            log_dir,
            db_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_directories_under_persist_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(&tmp.path().join("db_solvex"));

        assert!(paths.data_dir.is_dir());
        assert!(paths.log_dir.is_dir());
        assert_eq!(paths.db_path.file_name().unwrap(), "solvex_rag.db");
    }
}
