//! HTTP wish store for the wish wall.
//!
//! `GET /api/wishes` lists every wish newest first, `POST /api/wishes`
//! appends one. The browser wall polls nothing: it loads the list once
//! and prepends whatever its own POST returns.

pub mod config;
pub mod routes;
pub mod store;

pub use config::ServerConfig;
pub use routes::{router, ApiError, AppState};
pub use store::{FileWishStore, MemoryWishStore, NewWish, StoreError, WishStore};
