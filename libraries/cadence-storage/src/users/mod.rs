//! Account management and authentication queries
//!
//! Users and artists live in one table; the role column decides which
//! capabilities an account has.

use crate::error::is_unique_violation;
use cadence_core::{
    error::Result,
    types::{current_date, Artist, CreateUser, Role, User},
    CadenceError,
};
use sqlx::{FromRow, SqlitePool};

#[derive(Debug, FromRow)]
struct AccountRow {
    name: String,
    photo: String,
    register_date: String,
    role: String,
}

const SELECT_ACCOUNT: &str = "SELECT name, photo, register_date, role FROM accounts";

async fn hydrate(pool: &SqlitePool, row: AccountRow) -> Result<User> {
    let playlists = owned_playlists(pool, &row.name).await?;
    Ok(User {
        role: row.role.parse()?,
        name: row.name,
        photo: row.photo,
        register_date: row.register_date,
        playlists,
    })
}

async fn hydrate_all(pool: &SqlitePool, rows: Vec<AccountRow>) -> Result<Vec<User>> {
    let mut users = Vec::with_capacity(rows.len());
    for row in rows {
        users.push(hydrate(pool, row).await?);
    }
    Ok(users)
}

async fn into_artist(pool: &SqlitePool, user: User) -> Result<Artist> {
    let uploaded_songs = crate::songs::uploaded_by(pool, &user.name).await?;
    Ok(Artist {
        user,
        uploaded_songs,
    })
}

async fn owned_playlists(pool: &SqlitePool, owner: &str) -> Result<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT name FROM playlists WHERE owner = ? ORDER BY rowid",
    )
    .bind(owner)
    .fetch_all(pool)
    .await?;

    Ok(names)
}

/// Register a new account
///
/// Fails with `UserAlreadyExists` if the name is taken by a user or artist.
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let register_date = current_date();

    sqlx::query(
        "INSERT INTO accounts (name, photo, register_date, role, password_hash)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&user.name)
    .bind(&user.photo)
    .bind(&register_date)
    .bind(user.role.as_str())
    .bind(&user.password_hash)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            CadenceError::UserAlreadyExists(user.name.clone())
        } else {
            e.into()
        }
    })?;

    Ok(User {
        name: user.name,
        photo: user.photo,
        register_date,
        role: user.role,
        playlists: Vec::new(),
    })
}

pub async fn get_by_name(pool: &SqlitePool, name: &str) -> Result<Option<User>> {
    let row = sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE name = ?"))
        .bind(name)
        .fetch_optional(pool)
        .await?;

    match row {
        Some(row) => Ok(Some(hydrate(pool, row).await?)),
        None => Ok(None),
    }
}

/// Get an artist; plain users yield `None`
pub async fn get_artist(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    match get_by_name(pool, name).await? {
        Some(user) if user.role == Role::Artist => Ok(Some(into_artist(pool, user).await?)),
        _ => Ok(None),
    }
}

pub async fn get_role(pool: &SqlitePool, name: &str) -> Result<Option<Role>> {
    let role = sqlx::query_scalar::<_, String>("SELECT role FROM accounts WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    role.map(|r| r.parse()).transpose()
}

/// Get an account's password hash for authentication
pub async fn get_password_hash(pool: &SqlitePool, name: &str) -> Result<Option<String>> {
    let hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM accounts WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Delete an account of either role
///
/// Uploaded-song back-references go with it; songs and playlists stay.
pub async fn delete(pool: &SqlitePool, name: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM accounts WHERE name = ?")
        .bind(name)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CadenceError::UserNotFound(name.to_string()));
    }

    Ok(())
}

/// All accounts holding `role`, ordered by name
pub async fn get_all(pool: &SqlitePool, role: Role) -> Result<Vec<User>> {
    let rows =
        sqlx::query_as::<_, AccountRow>(&format!("{SELECT_ACCOUNT} WHERE role = ? ORDER BY name"))
            .bind(role.as_str())
            .fetch_all(pool)
            .await?;

    hydrate_all(pool, rows).await
}

pub async fn get_all_artists(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let users = get_all(pool, Role::Artist).await?;
    let mut artists = Vec::with_capacity(users.len());
    for user in users {
        artists.push(into_artist(pool, user).await?);
    }
    Ok(artists)
}

pub async fn search(pool: &SqlitePool, query: &str, role: Role) -> Result<Vec<User>> {
    let rows = sqlx::query_as::<_, AccountRow>(&format!(
        "{SELECT_ACCOUNT} WHERE role = ? AND name LIKE ? ESCAPE '\\' ORDER BY name"
    ))
    .bind(role.as_str())
    .bind(crate::contains_pattern(query))
    .fetch_all(pool)
    .await?;

    hydrate_all(pool, rows).await
}

/// Artists whose name contains `query`
pub async fn search_artists(pool: &SqlitePool, query: &str) -> Result<Vec<Artist>> {
    let users = search(pool, query, Role::Artist).await?;
    let mut artists = Vec::with_capacity(users.len());
    for user in users {
        artists.push(into_artist(pool, user).await?);
    }
    Ok(artists)
}
