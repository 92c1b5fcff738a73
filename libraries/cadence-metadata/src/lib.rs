//! Cadence Metadata
//!
//! Audio inspection for uploaded blobs.
//!
//! This crate provides:
//! - Duration probing of in-memory audio (MP3, FLAC, OGG, WAV, AAC, OPUS)
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_metadata::LoftyDurationProbe;
//! use cadence_core::DurationProbe;
//! # fn example(upload: &[u8]) {
//! let probe = LoftyDurationProbe::new();
//! let seconds = probe.probe_duration(upload).unwrap_or(0.0);
//! # }
//! ```

mod error;
mod probe;

pub use error::{MetadataError, Result};
pub use probe::LoftyDurationProbe;
