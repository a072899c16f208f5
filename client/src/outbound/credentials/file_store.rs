//! File-backed credential store.
//!
//! Token and username live in two sibling files, `token` and `username`,
//! inside one directory. A missing or blank file reads as "no credentials".

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;

use super::atomic_io::write_atomic;
use crate::domain::ports::{CredentialStore, CredentialStoreError, StoredCredentials};
use crate::domain::{SessionToken, Username};

const TOKEN_FILE: &str = "token";
const USERNAME_FILE: &str = "username";

/// Credential store rooted at one directory capability.
#[derive(Debug)]
pub struct FileCredentialStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl FileCredentialStore {
    /// Open (creating if needed) the credentials directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialStoreError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(root: &Utf8Path) -> Result<Self, CredentialStoreError> {
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(|err| io_error(root, &err))?;
        let dir =
            Dir::open_ambient_dir(root, ambient_authority()).map_err(|err| io_error(root, &err))?;
        Ok(Self {
            dir,
            root: root.to_path_buf(),
        })
    }

    /// Directory the credentials are stored in.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_value(&self, name: &str) -> Result<Option<String>, CredentialStoreError> {
        match self.dir.read_to_string(name) {
            Ok(raw) => {
                let value = raw.trim();
                Ok((!value.is_empty()).then(|| value.to_owned()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&self.root.join(name), &err)),
        }
    }

    fn remove_value(&self, name: &str) -> Result<(), CredentialStoreError> {
        match self.dir.remove_file(name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(&self.root.join(name), &err)),
        }
    }

    fn write_value(&self, name: &str, value: &str) -> Result<(), CredentialStoreError> {
        write_atomic(&self.dir, name, value).map_err(|err| io_error(&self.root.join(name), &err))
    }
}

fn io_error(path: &Utf8Path, err: &io::Error) -> CredentialStoreError {
    CredentialStoreError::io(format!("{path}: {err}"))
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, CredentialStoreError> {
        let (Some(token), Some(username)) = (
            self.read_value(TOKEN_FILE)?,
            self.read_value(USERNAME_FILE)?,
        ) else {
            debug!(root = %self.root, "no stored credentials");
            return Ok(None);
        };
        let token = SessionToken::new(token)
            .map_err(|err| CredentialStoreError::invalid(err.to_string()))?;
        let username =
            Username::new(username).map_err(|err| CredentialStoreError::invalid(err.to_string()))?;
        Ok(Some(StoredCredentials { token, username }))
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), CredentialStoreError> {
        self.write_value(TOKEN_FILE, credentials.token.expose())?;
        self.write_value(USERNAME_FILE, credentials.username.as_ref())?;
        debug!(root = %self.root, username = %credentials.username, "credentials saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        self.remove_value(TOKEN_FILE)?;
        self.remove_value(USERNAME_FILE)?;
        debug!(root = %self.root, "credentials cleared");
        Ok(())
    }
}
