use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, OnceLock},
};

use tempfile::TempDir;

pub fn test_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// An on-disk SQLite database that is removed when dropped.
pub struct TempDatabase {
    _dir: TempDir,
    path: PathBuf,
    url: String,
}

impl TempDatabase {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("scoring-test-")
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("db.sqlite");
        let url = format!("sqlite://{}?mode=rwc", path.to_string_lossy());
        Self {
            _dir: dir,
            path,
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Sets process environment variables for the lifetime of the guard and
/// restores the previous values on drop.
pub struct TestEnvGuard {
    _lock: MutexGuard<'static, ()>,
    previous: Vec<(String, Option<String>)>,
}

impl TestEnvGuard {
    pub fn new(vars: &[(&str, Option<&str>)]) -> Self {
        let lock = test_lock().lock().unwrap_or_else(|err| err.into_inner());
        let mut previous = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            previous.push((key.to_string(), std::env::var(key).ok()));
            // SAFETY: tests using TestEnvGuard are serialized by test_lock.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }

        Self {
            _lock: lock,
            previous,
        }
    }
}

impl Drop for TestEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests using TestEnvGuard are serialized by test_lock.
        unsafe {
            for (key, value) in self.previous.drain(..) {
                match value {
                    Some(value) => std::env::set_var(&key, value),
                    None => std::env::remove_var(&key),
                }
            }
        }
    }
}
