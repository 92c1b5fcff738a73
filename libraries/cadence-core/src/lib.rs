//! Cadence Core
//!
//! Storage-agnostic domain types, collaborator traits, and error handling for
//! the Cadence music streaming backend.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `User`, `Artist`, `Playlist`, and the closed
//!   `Genre` taxonomy with its configurable `GenreCatalog`
//! - **Collaborator Traits**: `StorageContext` (metadata persistence),
//!   `AudioStore` (blob persistence), `DurationProbe` (audio inspection)
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{Genre, GenreCatalog, GenreSet};
//!
//! let catalog = GenreCatalog::new(GenreSet::Current);
//! let genre = catalog.parse("Rock").unwrap();
//! assert_eq!(genre, Genre::Rock);
//! assert!(catalog.parse("rock").is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use storage::StorageContext;
pub use traits::{AudioStore, DurationProbe};

pub use types::{
    Artist, CreatePlaylist, CreateSong, CreateUser, Genre, GenreCatalog, GenreSet, Identity,
    Playlist, Role, SearchResults, Song, UpdatePlaylist, User,
};
