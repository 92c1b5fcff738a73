/// Duration probing using lofty
use crate::error::{MetadataError, Result};
use cadence_core::DurationProbe;
use lofty::{AudioFile, Probe};
use std::io::Cursor;

/// Duration probe backed by the lofty library
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyDurationProbe;

impl LoftyDurationProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }

    /// Read the stream properties of `data` and return its duration in seconds
    pub fn read_duration(&self, data: &[u8]) -> Result<f64> {
        if data.is_empty() {
            return Err(MetadataError::Empty);
        }

        let tagged_file = Probe::new(Cursor::new(data)).guess_file_type()?.read()?;
        Ok(tagged_file.properties().duration().as_secs_f64())
    }
}

impl DurationProbe for LoftyDurationProbe {
    fn probe_duration(&self, data: &[u8]) -> Option<f64> {
        match self.read_duration(data) {
            Ok(seconds) => Some(seconds),
            Err(e) => {
                tracing::debug!("Could not determine audio duration: {}", e);
                None
            }
        }
    }
}
