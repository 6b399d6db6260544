//! File-backed session store
//!
//! Files (in the configured data directory):
//! - `user.json` - The current user record, pretty-printed JSON
//! - `token` - The bearer token
//!
//! Both are written atomically (write to temp file, then rename) so a crash
//! never leaves a half-written record behind. On Unix the token file is
//! readable by its owner only.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{SessionError, SessionResult};
use super::SessionStore;
use crate::config::Config;
use crate::models::UserRecord;

const USER_FILE: &str = "user.json";
const TOKEN_FILE: &str = "token";

/// Session store persisted as two files in a directory
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Create a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store in the configured data directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.data_dir.clone())
    }

    /// Directory holding the session files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn ensure_dir(&self) -> SessionResult<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|source| SessionError::CreateDirectory {
                path: self.dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> SessionResult<Option<UserRecord>> {
        let path = self.user_path();
        let content = match read_optional(&path)? {
            Some(c) => c,
            None => return Ok(None),
        };

        let user = serde_json::from_str(&content).map_err(|e| SessionError::CorruptRecord {
            path,
            details: e.to_string(),
        })?;
        Ok(Some(user))
    }

    fn save(&self, user: &UserRecord) -> SessionResult<()> {
        self.ensure_dir()?;
        let content =
            serde_json::to_vec_pretty(user).map_err(|e| SessionError::Serialize(e.to_string()))?;
        atomic_write(&self.user_path(), &content, false)?;
        debug!("Saved user record for {}", user.username);
        Ok(())
    }

    fn token(&self) -> SessionResult<Option<String>> {
        Ok(read_optional(&self.token_path())?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    fn save_token(&self, token: &str) -> SessionResult<()> {
        self.ensure_dir()?;
        atomic_write(&self.token_path(), token.as_bytes(), true)
    }

    fn clear(&self) -> SessionResult<()> {
        remove_if_exists(&self.user_path())?;
        remove_if_exists(&self.token_path())?;
        debug!("Cleared session in {:?}", self.dir);
        Ok(())
    }
}

fn read_optional(path: &Path) -> SessionResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SessionError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn remove_if_exists(path: &Path) -> SessionResult<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::from_io(e, path.to_path_buf())),
    }
}

/// Write data atomically using write-to-temp-then-rename pattern
///
/// `private` restricts the file to its owner before any data is written.
fn atomic_write(path: &Path, data: &[u8], private: bool) -> SessionResult<()> {
    let temp_path = path.with_extension("tmp");

    {
        let mut file =
            File::create(&temp_path).map_err(|e| SessionError::from_io(e, temp_path.clone()))?;
        if private {
            restrict_to_owner(&file).map_err(|e| SessionError::from_io(e, temp_path.clone()))?;
        }
        file.write_all(data)
            .map_err(|e| SessionError::from_io(e, temp_path.clone()))?;
        file.sync_all()
            .map_err(|e| SessionError::from_io(e, temp_path.clone()))?;
    }

    fs::rename(&temp_path, path).map_err(|source| SessionError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })
}

#[cfg(unix)]
fn restrict_to_owner(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn alice() -> UserRecord {
        let mut user = UserRecord::new("alice");
        user.email = "a@x.com".to_string();
        user.favorite_movies = vec!["m1".to_string()];
        user
    }

    #[test]
    fn test_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());
        assert!(store.session().unwrap().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested"));

        store.replace(&alice(), "jwt-token").unwrap();

        assert_eq!(store.load().unwrap(), Some(alice()));
        assert_eq!(store.token().unwrap().as_deref(), Some("jwt-token"));
        assert!(store.is_authenticated());

        let session = store.session().unwrap().unwrap();
        assert_eq!(session.auth().username, "alice");
        assert_eq!(session.auth().token, "jwt-token");
    }

    #[test]
    fn test_user_without_token_is_not_authenticated() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.save(&alice()).unwrap();
        assert!(!store.is_authenticated());
        assert!(store.session().unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_both() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        store.replace(&alice(), "jwt-token").unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(store.token().unwrap().is_none());
        assert!(!temp_dir.path().join(USER_FILE).exists());
        assert!(!temp_dir.path().join(TOKEN_FILE).exists());

        // Clearing an empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_update_is_read_modify_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());

        assert!(store.update(|u| u.email.clear()).unwrap().is_none());

        store.save(&alice()).unwrap();
        let updated = store
            .update(|u| {
                u.add_favorite("m2");
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.favorite_movies, vec!["m1", "m2"]);
        assert_eq!(store.load().unwrap().unwrap().favorite_movies, vec!["m1", "m2"]);
        assert_eq!(store.load().unwrap().unwrap().email, "a@x.com");
    }

    #[test]
    fn test_corrupt_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        fs::write(temp_dir.path().join(USER_FILE), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, SessionError::CorruptRecord { .. }));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_token_is_trimmed() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        fs::write(temp_dir.path().join(TOKEN_FILE), "abc\n").unwrap();
        assert_eq!(store.token().unwrap().as_deref(), Some("abc"));

        fs::write(temp_dir.path().join(TOKEN_FILE), "  \n").unwrap();
        assert!(store.token().unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.save(&alice()).unwrap();

        assert!(temp_dir.path().join(USER_FILE).exists());
        assert!(!temp_dir.path().join("user.tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        store.save_token("secret").unwrap();

        let mode = fs::metadata(temp_dir.path().join(TOKEN_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);

        // Overwriting keeps the restriction
        store.save_token("rotated").unwrap();
        let mode = fs::metadata(temp_dir.path().join(TOKEN_FILE))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        let store = FileSessionStore::from_config(&config);
        store.save_token("t").unwrap();
        assert_eq!(store.dir(), temp_dir.path());
        assert!(temp_dir.path().join(TOKEN_FILE).exists());
    }
}
