use std::fmt;
use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use thiserror::Error;

pub const USER_ENV: &str = "QUILL_ADMIN_USER";
pub const PASSWORD_ENV: &str = "QUILL_ADMIN_PASSWORD";

#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Admin {0} is empty")]
    Empty(&'static str),
}

/// The single admin account. Loaded once at startup and never changed.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads the username and password from their files. `QUILL_ADMIN_USER`
    /// and `QUILL_ADMIN_PASSWORD` take precedence when set.
    pub fn load(user_file: &Path, password_file: &Path) -> Result<Self, CredentialsError> {
        let username = read_value(USER_ENV, user_file, "username")?;
        let password = read_value(PASSWORD_ENV, password_file, "password")?;
        Ok(Self { username, password })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact match on both fields.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so a wrong username costs the same as a wrong password
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (user_ok & pass_ok).into()
    }
}

fn read_value(
    env_key: &str,
    path: &Path,
    label: &'static str,
) -> Result<String, CredentialsError> {
    let raw = match std::env::var(env_key) {
        Ok(value) => value,
        Err(_) => std::fs::read_to_string(path).map_err(|source| CredentialsError::Read {
            path: path.to_path_buf(),
            source,
        })?,
    };

    let value = raw.trim_end_matches(['\r', '\n']).to_string();
    if value.is_empty() {
        return Err(CredentialsError::Empty(label));
    }
    Ok(value)
}
