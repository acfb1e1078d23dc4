// src/session.rs
//
// Persistent slot for the admin bearer token.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::SessionError;

/// Key under which the token is stored.
pub const TOKEN_KEY: &str = "admin_token";

pub trait SessionStore: Send + Sync {
    /// Current token, `None` when logged out. Blank tokens count as absent.
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str) -> Result<(), SessionError>;
    fn clear_token(&self) -> Result<(), SessionError>;

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

fn usable(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.trim().is_empty())
}

/// Token kept in a JSON object file, next to whatever other keys the file holds.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Map<String, Value>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slots(&self, slots: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        match self.read_slots() {
            Ok(slots) => usable(
                slots
                    .get(TOKEN_KEY)
                    .and_then(Value::as_str)
                    .map(str::to_string),
            ),
            Err(e) => {
                log::warn!("session read failed path={} error={e}", self.path.display());
                None
            }
        }
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        // A corrupt file is replaced rather than blocking login.
        let mut slots = self.read_slots().unwrap_or_default();
        slots.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_slots(&slots)
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let mut slots = match self.read_slots() {
            Ok(slots) => slots,
            Err(SessionError::Corrupt(_)) => Map::new(),
            Err(e) => return Err(e),
        };
        if slots.remove(TOKEN_KEY).is_none() && !self.path.exists() {
            return Ok(());
        }
        self.write_slots(&slots)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Mutex::new(Some(token.to_string())),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn token(&self) -> Option<String> {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        usable(slot.clone())
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
        Ok(())
    }
}
