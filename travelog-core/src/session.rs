//! Session bootstrap state and the durable bits of it.
//!
//! The application context is an explicit [`Session`] value owned by the
//! facade, not an ambient global: it is filled in by `bootstrap` on startup
//! and emptied again on logout. [`SessionStore`] is the on-disk side --
//! the session cookie and the display preferences that survive restarts.

use crate::config::Config;
use crate::error::Result;
use crate::user::User;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const PREFS_FILE: &str = "prefs.toml";
const COOKIE_FILE: &str = "session";

/// Display preferences persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    #[serde(default)]
    pub dark_mode: bool,
}

/// The in-memory application context: who is logged in and how they like
/// their output.
#[derive(Debug, Default)]
pub struct Session {
    pub user: Option<User>,
    pub prefs: Prefs,
}

/// Reads and writes the state directory: preferences and the session cookie.
#[derive(Debug, Clone)]
pub struct SessionStore {
    state_dir: PathBuf,
}

impl SessionStore {
    pub fn new(config: &Config) -> Self {
        Self {
            state_dir: config.state_dir.clone(),
        }
    }

    fn prefs_path(&self) -> PathBuf {
        self.state_dir.join(PREFS_FILE)
    }

    fn cookie_path(&self) -> PathBuf {
        self.state_dir.join(COOKIE_FILE)
    }

    /// Loads preferences; a missing or unreadable file means defaults.
    pub fn load_prefs(&self) -> Prefs {
        fs::read_to_string(self.prefs_path())
            .ok()
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    pub fn save_prefs(&self, prefs: &Prefs) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        let s = toml::to_string(prefs).unwrap_or_default();
        fs::write(self.prefs_path(), s)?;
        Ok(())
    }

    /// The session cookie from the last successful login, if any.
    pub fn load_cookie(&self) -> Option<String> {
        let s = fs::read_to_string(self.cookie_path()).ok()?;
        let s = s.trim();
        if s.is_empty() { None } else { Some(s.to_string()) }
    }

    pub fn save_cookie(&self, cookie: &str) -> Result<()> {
        fs::create_dir_all(&self.state_dir)?;
        fs::write(self.cookie_path(), cookie)?;
        Ok(())
    }

    pub fn clear_cookie(&self) -> Result<()> {
        let path = self.cookie_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use tempfile::tempdir;

    fn mk_store() -> (SessionStore, tempfile::TempDir) {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("travelog"));
        (SessionStore::new(&config), tmp)
    }

    #[test]
    fn prefs_default_when_file_missing() {
        let (store, _tmp) = mk_store();
        assert_eq!(store.load_prefs(), Prefs::default());
    }

    #[test]
    fn prefs_survive_a_reload() {
        let (store, _tmp) = mk_store();
        let prefs = Prefs { dark_mode: true };
        store.save_prefs(&prefs).unwrap();
        assert_eq!(store.load_prefs(), prefs);
    }

    #[test]
    fn cookie_round_trip_and_clear() {
        let (store, _tmp) = mk_store();
        assert!(store.load_cookie().is_none());

        store.save_cookie("sid=abc123").unwrap();
        assert_eq!(store.load_cookie().as_deref(), Some("sid=abc123"));

        store.clear_cookie().unwrap();
        assert!(store.load_cookie().is_none());
        // clearing twice is fine
        store.clear_cookie().unwrap();
    }

    #[test]
    fn corrupt_prefs_fall_back_to_defaults() {
        let (store, _tmp) = mk_store();
        fs::create_dir_all(store.state_dir.clone()).unwrap();
        fs::write(store.prefs_path(), "not = [valid").unwrap();
        assert_eq!(store.load_prefs(), Prefs::default());
    }
}
