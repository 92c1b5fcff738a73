//! Song metadata queries

use crate::error::{is_foreign_key_violation, is_unique_violation};
use cadence_core::{error::Result, CadenceError, Genre, Song};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

#[derive(Debug, FromRow)]
struct SongRow {
    name: String,
    artist: String,
    genre: String,
    photo: String,
    streams: i64,
    seconds_duration: f64,
}

impl TryFrom<SongRow> for Song {
    type Error = CadenceError;

    fn try_from(row: SongRow) -> Result<Self> {
        // Stored labels are read against the full taxonomy so songs survive a
        // switch to a narrower genre set.
        let genre: Genre = row.genre.parse()?;
        Ok(Song {
            name: row.name,
            artist: row.artist,
            genre,
            photo: row.photo,
            streams: row.streams.max(0) as u64,
            seconds_duration: row.seconds_duration,
        })
    }
}

fn into_songs(rows: Vec<SongRow>) -> Result<Vec<Song>> {
    rows.into_iter().map(Song::try_from).collect()
}

const SELECT_SONG: &str =
    "SELECT name, artist, genre, photo, streams, seconds_duration FROM songs";

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Song>> {
    let row = sqlx::query_as::<_, SongRow>(&format!("{SELECT_SONG} WHERE name = ?"))
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.map(Song::try_from).transpose()
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query_as::<_, SongRow>(&format!("{SELECT_SONG} ORDER BY name"))
        .fetch_all(pool)
        .await?;

    into_songs(rows)
}

pub async fn get_by_genre(pool: &SqlitePool, genre: Genre) -> Result<Vec<Song>> {
    let rows =
        sqlx::query_as::<_, SongRow>(&format!("{SELECT_SONG} WHERE genre = ? ORDER BY name"))
            .bind(genre.label())
            .fetch_all(pool)
            .await?;

    into_songs(rows)
}

pub async fn get_by_artist(pool: &SqlitePool, artist: &str) -> Result<Vec<Song>> {
    let rows =
        sqlx::query_as::<_, SongRow>(&format!("{SELECT_SONG} WHERE artist = ? ORDER BY name"))
            .bind(artist)
            .fetch_all(pool)
            .await?;

    into_songs(rows)
}

/// Insert the record and the artist back-reference in one transaction
///
/// `streams` and `seconds_duration` are taken from `song` as-is.
pub async fn create(pool: &SqlitePool, song: &Song) -> Result<()> {
    let mut tx = pool.begin().await?;

    insert_row(&mut tx, song).await?;

    sqlx::query("INSERT OR IGNORE INTO artist_uploaded_songs (artist_name, song_name) VALUES (?, ?)")
        .bind(&song.artist)
        .bind(&song.name)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                CadenceError::ArtistNotFound(song.artist.clone())
            } else {
                e.into()
            }
        })?;

    tx.commit().await?;
    Ok(())
}

/// Put back a record removed by [`delete`].
///
/// Unlike [`create`] this succeeds when the owning account has been deleted
/// in the meantime; the back-reference is only re-added if it still exists.
pub async fn restore(pool: &SqlitePool, song: &Song) -> Result<()> {
    let mut tx = pool.begin().await?;

    insert_row(&mut tx, song).await?;

    sqlx::query(
        "INSERT OR IGNORE INTO artist_uploaded_songs (artist_name, song_name)
         SELECT ?, ? WHERE EXISTS (SELECT 1 FROM accounts WHERE name = ?)",
    )
    .bind(&song.artist)
    .bind(&song.name)
    .bind(&song.artist)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

async fn insert_row(tx: &mut Transaction<'_, Sqlite>, song: &Song) -> Result<()> {
    sqlx::query(
        "INSERT INTO songs (name, artist, genre, photo, streams, seconds_duration)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&song.name)
    .bind(&song.artist)
    .bind(song.genre.label())
    .bind(&song.photo)
    .bind(song.streams as i64)
    .bind(song.seconds_duration)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::SongAlreadyExists(song.name.clone())
        } else {
            e.into()
        }
    })?;
    Ok(())
}

/// Remove the record and every back-reference to it in one transaction
pub async fn delete(pool: &SqlitePool, name: &str) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM songs WHERE name = ?")
        .bind(name)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::SongNotFound(name.to_string()));
    }

    sqlx::query("DELETE FROM artist_uploaded_songs WHERE song_name = ?")
        .bind(name)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn increase_streams(pool: &SqlitePool, name: &str) -> Result<()> {
    let result = sqlx::query("UPDATE songs SET streams = streams + 1 WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::SongNotFound(name.to_string()));
    }

    Ok(())
}

pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Song>> {
    let rows = sqlx::query_as::<_, SongRow>(&format!(
        "{SELECT_SONG} WHERE name LIKE ? ESCAPE '\\' ORDER BY name"
    ))
    .bind(crate::contains_pattern(query))
    .fetch_all(pool)
    .await?;

    into_songs(rows)
}

/// Names of the songs an artist uploaded, in upload order
pub async fn uploaded_by(pool: &SqlitePool, artist: &str) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT song_name FROM artist_uploaded_songs WHERE artist_name = ? ORDER BY rowid",
    )
    .bind(artist)
    .fetch_all(pool)
    .await?;

    Ok(names)
}
