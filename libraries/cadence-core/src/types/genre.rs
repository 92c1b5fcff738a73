//! Genre taxonomy
//!
//! `Genre` is the closed set of every label the service has ever shipped.
//! Which of those labels a deployment accepts is decided by its
//! [`GenreSet`], surfaced through [`GenreCatalog`]. Labels are parsed once
//! at the boundary and passed around as `Genre` afterwards.

use crate::error::{CadenceError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A music genre. Serialized as its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Pop")]
    Pop,
    #[serde(rename = "Rock")]
    Rock,
    #[serde(rename = "Hip-hop")]
    HipHop,
    #[serde(rename = "R&B (Rhythm and Blues)")]
    RhythmAndBlues,
    #[serde(rename = "Jazz")]
    Jazz,
    #[serde(rename = "Blues")]
    Blues,
    #[serde(rename = "Reggae")]
    Reggae,
    #[serde(rename = "Country")]
    Country,
    #[serde(rename = "Folk")]
    Folk,
    #[serde(rename = "Classical")]
    Classical,
    #[serde(rename = "Electronic")]
    Electronic,
    #[serde(rename = "Dance")]
    Dance,
    #[serde(rename = "Metal")]
    Metal,
    #[serde(rename = "Punk")]
    Punk,
    #[serde(rename = "Funk")]
    Funk,
    #[serde(rename = "Soul")]
    Soul,
    #[serde(rename = "Gospel")]
    Gospel,
    #[serde(rename = "Latin")]
    Latin,
    #[serde(rename = "World Music")]
    WorldMusic,
    #[serde(rename = "Experimental")]
    Experimental,
    #[serde(rename = "Ambient")]
    Ambient,
    #[serde(rename = "Fusion")]
    Fusion,
    #[serde(rename = "Instrumental")]
    Instrumental,
    #[serde(rename = "Alternative")]
    Alternative,
    #[serde(rename = "Indie")]
    Indie,
    #[serde(rename = "Rap")]
    Rap,
    #[serde(rename = "Ska")]
    Ska,
    #[serde(rename = "Grunge")]
    Grunge,
    #[serde(rename = "Trap")]
    Trap,
    #[serde(rename = "Reggaeton")]
    Reggaeton,
    #[serde(rename = "Acoustic")]
    Acoustic,
    #[serde(rename = "Disco")]
    Disco,
    #[serde(rename = "Hardstyle")]
    Hardstyle,
    #[serde(rename = "Opera")]
    Opera,
    #[serde(rename = "Phonk")]
    Phonk,
    #[serde(rename = "Techno")]
    Techno,
}

impl Genre {
    /// Every genre, in declaration order
    pub const ALL: [Genre; 36] = [
        Genre::Pop,
        Genre::Rock,
        Genre::HipHop,
        Genre::RhythmAndBlues,
        Genre::Jazz,
        Genre::Blues,
        Genre::Reggae,
        Genre::Country,
        Genre::Folk,
        Genre::Classical,
        Genre::Electronic,
        Genre::Dance,
        Genre::Metal,
        Genre::Punk,
        Genre::Funk,
        Genre::Soul,
        Genre::Gospel,
        Genre::Latin,
        Genre::WorldMusic,
        Genre::Experimental,
        Genre::Ambient,
        Genre::Fusion,
        Genre::Instrumental,
        Genre::Alternative,
        Genre::Indie,
        Genre::Rap,
        Genre::Ska,
        Genre::Grunge,
        Genre::Trap,
        Genre::Reggaeton,
        Genre::Acoustic,
        Genre::Disco,
        Genre::Hardstyle,
        Genre::Opera,
        Genre::Phonk,
        Genre::Techno,
    ];

    /// The stored string form of the genre
    pub fn label(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::HipHop => "Hip-hop",
            Genre::RhythmAndBlues => "R&B (Rhythm and Blues)",
            Genre::Jazz => "Jazz",
            Genre::Blues => "Blues",
            Genre::Reggae => "Reggae",
            Genre::Country => "Country",
            Genre::Folk => "Folk",
            Genre::Classical => "Classical",
            Genre::Electronic => "Electronic",
            Genre::Dance => "Dance",
            Genre::Metal => "Metal",
            Genre::Punk => "Punk",
            Genre::Funk => "Funk",
            Genre::Soul => "Soul",
            Genre::Gospel => "Gospel",
            Genre::Latin => "Latin",
            Genre::WorldMusic => "World Music",
            Genre::Experimental => "Experimental",
            Genre::Ambient => "Ambient",
            Genre::Fusion => "Fusion",
            Genre::Instrumental => "Instrumental",
            Genre::Alternative => "Alternative",
            Genre::Indie => "Indie",
            Genre::Rap => "Rap",
            Genre::Ska => "Ska",
            Genre::Grunge => "Grunge",
            Genre::Trap => "Trap",
            Genre::Reggaeton => "Reggaeton",
            Genre::Acoustic => "Acoustic",
            Genre::Disco => "Disco",
            Genre::Hardstyle => "Hardstyle",
            Genre::Opera => "Opera",
            Genre::Phonk => "Phonk",
            Genre::Techno => "Techno",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = CadenceError;

    /// Exact, case-sensitive label match against the full taxonomy.
    /// Use [`GenreCatalog::parse`] to also check the deployment's active set.
    fn from_str(s: &str) -> Result<Self> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label() == s)
            .ok_or_else(|| CadenceError::GenreNotValid(s.to_string()))
    }
}

/// Which revision of the genre taxonomy a deployment accepts.
///
/// Only uploads and genre filters are checked against the set; songs stored
/// under a label outside it stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenreSet {
    /// All 36 labels
    #[default]
    Current,
    /// The 30 labels that predate Acoustic, Disco, Hardstyle, Opera, Phonk and Techno
    Legacy,
}

impl GenreSet {
    /// Whether `genre` belongs to this revision
    pub fn contains(self, genre: Genre) -> bool {
        match self {
            GenreSet::Current => true,
            GenreSet::Legacy => !matches!(
                genre,
                Genre::Acoustic
                    | Genre::Disco
                    | Genre::Hardstyle
                    | Genre::Opera
                    | Genre::Phonk
                    | Genre::Techno
            ),
        }
    }
}

/// Membership validation against the active genre set
#[derive(Debug, Clone, Copy, Default)]
pub struct GenreCatalog {
    set: GenreSet,
}

impl GenreCatalog {
    pub fn new(set: GenreSet) -> Self {
        Self { set }
    }

    pub fn set(&self) -> GenreSet {
        self.set
    }

    /// `Ok(true)` iff `label` is exactly one of the active labels,
    /// `Err(GenreNotValid)` otherwise.
    pub fn is_valid(&self, label: &str) -> Result<bool> {
        self.parse(label).map(|_| true)
    }

    /// Validated-parse constructor used at every boundary
    pub fn parse(&self, label: &str) -> Result<Genre> {
        match label.parse::<Genre>() {
            Ok(genre) if self.set.contains(genre) => Ok(genre),
            _ => {
                tracing::warn!(genre = label, "Genre is not a valid genre");
                Err(CadenceError::GenreNotValid(label.to_string()))
            }
        }
    }

    /// Stored string form of `genre`, provided the active set still knows it
    pub fn canonical_value(&self, genre: Genre) -> Result<&'static str> {
        if self.set.contains(genre) {
            Ok(genre.label())
        } else {
            tracing::warn!(genre = genre.label(), "Genre is not a valid genre");
            Err(CadenceError::GenreNotValid(genre.label().to_string()))
        }
    }

    /// Active genres in declaration order
    pub fn members(&self) -> Vec<Genre> {
        Genre::ALL
            .into_iter()
            .filter(|genre| self.set.contains(*genre))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_round_trips_through_the_catalog() {
        let catalog = GenreCatalog::new(GenreSet::Current);
        for genre in Genre::ALL {
            assert!(catalog.is_valid(genre.label()).unwrap());
            assert_eq!(catalog.canonical_value(genre).unwrap(), genre.label());
            assert_eq!(catalog.parse(genre.label()).unwrap(), genre);
        }
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<_> = Genre::ALL.iter().map(|g| g.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), Genre::ALL.len());
    }

    #[test]
    fn non_members_are_rejected() {
        let catalog = GenreCatalog::default();
        for label in ["NotAGenre", "rock", "POP", " Pop", "", "Hip Hop"] {
            assert!(matches!(
                catalog.is_valid(label),
                Err(CadenceError::GenreNotValid(_))
            ));
        }
    }

    #[test]
    fn legacy_set_drops_newer_labels() {
        let legacy = GenreCatalog::new(GenreSet::Legacy);
        assert_eq!(legacy.members().len(), 30);
        assert!(legacy.is_valid("Reggaeton").unwrap());
        assert!(legacy.is_valid("Techno").is_err());
        assert!(legacy.canonical_value(Genre::Phonk).is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&Genre::RhythmAndBlues).unwrap();
        assert_eq!(json, "\"R&B (Rhythm and Blues)\"");
        let genre: Genre = serde_json::from_str("\"World Music\"").unwrap();
        assert_eq!(genre, Genre::WorldMusic);
    }
}
