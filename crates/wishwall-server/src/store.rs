//! Wish persistence: an append-only list kept newest first.
//!
//! Reads never fail outward; a missing or unreadable document is an empty
//! wall. Writes go through a temp file and a rename so a crash mid-write
//! leaves the previous document intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use wishwall_engine::Wish;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("name and message are required")]
    Validation,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Body of a wish submission. Missing fields read as empty and fail
/// validation like blank ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWish {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

impl NewWish {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Trim both fields; either one empty afterwards is a validation error.
    pub fn validate(&self) -> Result<(String, String), StoreError> {
        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(StoreError::Validation);
        }
        Ok((name.to_string(), message.to_string()))
    }

    /// Validate and stamp a new id and creation time.
    fn mint(&self) -> Result<Wish, StoreError> {
        let (name, message) = self.validate()?;
        Ok(Wish {
            id: Uuid::new_v4().to_string(),
            name,
            message,
            created_at: now_millis(),
        })
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

pub trait WishStore: Send {
    /// All wishes, newest first.
    fn list(&self) -> Vec<Wish>;

    /// Validate, stamp and store a wish at the front of the list.
    fn append(&mut self, new: &NewWish) -> Result<Wish, StoreError>;
}

/// Process-local store; everything is gone on restart.
#[derive(Debug, Default)]
pub struct MemoryWishStore {
    wishes: Vec<Wish>,
}

impl MemoryWishStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WishStore for MemoryWishStore {
    fn list(&self) -> Vec<Wish> {
        self.wishes.clone()
    }

    fn append(&mut self, new: &NewWish) -> Result<Wish, StoreError> {
        let wish = new.mint()?;
        self.wishes.insert(0, wish.clone());
        Ok(wish)
    }
}

/// On-disk document: `{"wishes": [...]}`, newest first.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WishDocument {
    #[serde(default)]
    wishes: Vec<Wish>,
}

/// Store backed by one JSON document, re-read on every call.
#[derive(Debug, Clone)]
pub struct FileWishStore {
    path: PathBuf,
}

impl FileWishStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Wish>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(Wish::list_from_json(&text)?)
    }

    fn write(&self, wishes: Vec<Wish>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let doc = WishDocument { wishes };
        let bytes = serde_json::to_vec_pretty(&doc)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "failed to remove temp wish file");
            }
            return Err(e.into());
        }
        Ok(())
    }
}

impl WishStore for FileWishStore {
    fn list(&self) -> Vec<Wish> {
        self.read().unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "wish file unreadable, serving empty list");
            Vec::new()
        })
    }

    fn append(&mut self, new: &NewWish) -> Result<Wish, StoreError> {
        let wish = new.mint()?;
        let mut wishes = self.list();
        wishes.insert(0, wish.clone());
        self.write(wishes)?;
        Ok(wish)
    }
}
