//! Playlist queries

use crate::error::is_unique_violation;
use cadence_core::{
    error::Result,
    types::{current_date, CreatePlaylist, Playlist, UpdatePlaylist},
    CadenceError,
};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};

#[derive(Debug, FromRow)]
struct PlaylistRow {
    name: String,
    photo: String,
    description: String,
    upload_date: String,
    owner: String,
}

const SELECT_PLAYLIST: &str =
    "SELECT name, photo, description, upload_date, owner FROM playlists";

async fn hydrate(pool: &SqlitePool, row: PlaylistRow) -> Result<Playlist> {
    let song_names = sqlx::query_scalar::<_, String>(
        "SELECT song_name FROM playlist_songs WHERE playlist_name = ? ORDER BY position",
    )
    .bind(&row.name)
    .fetch_all(pool)
    .await?;

    Ok(Playlist {
        name: row.name,
        photo: row.photo,
        description: row.description,
        upload_date: row.upload_date,
        owner: row.owner,
        song_names,
    })
}

async fn hydrate_all(pool: &SqlitePool, rows: Vec<PlaylistRow>) -> Result<Vec<Playlist>> {
    let mut playlists = Vec::with_capacity(rows.len());
    for row in rows {
        playlists.push(hydrate(pool, row).await?);
    }
    Ok(playlists)
}

async fn write_songs(
    tx: &mut Transaction<'_, Sqlite>,
    playlist: &str,
    song_names: &[String],
) -> Result<()> {
    sqlx::query("DELETE FROM playlist_songs WHERE playlist_name = ?")
        .bind(playlist)
        .execute(&mut **tx)
        .await?;

    for (position, song) in song_names.iter().enumerate() {
        sqlx::query(
            "INSERT INTO playlist_songs (playlist_name, position, song_name) VALUES (?, ?, ?)",
        )
        .bind(playlist)
        .bind(position as i64)
        .bind(song)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let upload_date = current_date();
    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO playlists (name, photo, description, upload_date, owner)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&playlist.name)
    .bind(&playlist.photo)
    .bind(&playlist.description)
    .bind(&upload_date)
    .bind(&playlist.owner)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::PlaylistAlreadyExists(playlist.name.clone())
        } else {
            e.into()
        }
    })?;

    write_songs(&mut tx, &playlist.name, &playlist.song_names).await?;
    tx.commit().await?;

    Ok(Playlist {
        name: playlist.name,
        photo: playlist.photo,
        description: playlist.description,
        upload_date,
        owner: playlist.owner,
        song_names: playlist.song_names,
    })
}

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Playlist>> {
    let row = sqlx::query_as::<_, PlaylistRow>(&format!("{SELECT_PLAYLIST} WHERE name = ?"))
        .bind(name)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(hydrate(pool, row).await?)),
        None => Ok(None),
    }
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Playlist>> {
    let rows = sqlx::query_as::<_, PlaylistRow>(&format!("{SELECT_PLAYLIST} ORDER BY name"))
        .fetch_all(pool)
        .await?;

    hydrate_all(pool, rows).await
}

/// Replace a playlist's fields; a rename carries its songs along
pub async fn update(pool: &SqlitePool, name: &str, update: UpdatePlaylist) -> Result<()> {
    let target = update
        .new_name
        .as_deref()
        .filter(|n| !n.is_empty())
        .unwrap_or(name)
        .to_string();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE playlists SET name = ?, photo = ?, description = ? WHERE name = ?",
    )
    .bind(&target)
    .bind(&update.photo)
    .bind(&update.description)
    .bind(name)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::PlaylistAlreadyExists(target.clone())
        } else {
            e.into()
        }
    })?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::PlaylistNotFound(name.to_string()));
    }

    write_songs(&mut tx, &target, &update.song_names).await?;
    tx.commit().await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::PlaylistNotFound(name.to_string()));
    }

    Ok(())
}

pub async fn search(pool: &SqlitePool, query: &str) -> Result<Vec<Playlist>> {
    let rows = sqlx::query_as::<_, PlaylistRow>(&format!(
        "{SELECT_PLAYLIST} WHERE name LIKE ? ESCAPE '\\' ORDER BY name"
    ))
    .bind(crate::contains_pattern(query))
    .fetch_all(pool)
    .await?;

    hydrate_all(pool, rows).await
}
