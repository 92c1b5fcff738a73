//! Common test utilities and fixtures

#![allow(dead_code)]
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use cadence_core::{CreateUser, GenreSet, Role};
use cadence_server::{config::ServerConfig, create_router, state::AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const BOUNDARY: &str = "cadence-test-boundary";

/// A fully wired application backed by a temporary database and audio dir
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub config: ServerConfig,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_genre_set(GenreSet::Current).await
    }

    pub async fn with_genre_set(genre_set: GenreSet) -> Self {
        let temp_dir = TempDir::new().unwrap();

        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "test-secret-key".to_string();
        config.auth.bcrypt_cost = 4;
        config.catalog.genre_set = genre_set;
        config.storage.database_url =
            format!("sqlite://{}", temp_dir.path().join("test.db").display());
        config.storage.audio_storage_path = temp_dir.path().join("audio");
        config.validate().unwrap();

        let state = AppState::from_config(&config).await.unwrap();
        let router = create_router(state.clone(), config.max_upload_bytes());

        Self {
            router,
            state,
            config,
            _temp_dir: temp_dir,
        }
    }

    /// Insert an account directly and return an access token for it
    pub async fn account(&self, name: &str, role: Role) -> String {
        let password_hash = self.state.auth_service.hash_password(fixtures::PASSWORD).unwrap();
        self.state
            .db
            .create_user(CreateUser {
                name: name.to_string(),
                photo: "https://photo".to_string(),
                password_hash,
                role,
            })
            .await
            .unwrap();
        self.token(name)
    }

    pub fn token(&self, name: &str) -> String {
        self.state.auth_service.create_access_token(name).unwrap()
    }

    /// Send a request and decode the JSON body (Null when empty)
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(authed(Method::GET, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(authed(Method::DELETE, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn patch(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(authed(Method::PATCH, uri, token).body(Body::empty()).unwrap())
            .await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: &str,
        body: &Value,
    ) -> (StatusCode, Value) {
        let request = authed(method, uri, token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST /api/songs with `audio` as the multipart `file` field
    pub async fn upload_song(
        &self,
        token: &str,
        name: &str,
        genre: &str,
        audio: &[u8],
    ) -> (StatusCode, Value) {
        let uri = format!(
            "/api/songs?name={}&genre={}&photo=https%3A%2F%2Fphoto",
            encode(name),
            encode(genre)
        );
        let request = authed(Method::POST, &uri, token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_file(audio)))
            .unwrap();
        self.send(request).await
    }
}

pub fn authed(method: Method, uri: &str, token: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Minimal query-string encoding for the names used in tests
pub fn encode(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace(' ', "%20")
        .replace('&', "%26")
        .replace('(', "%28")
        .replace(')', "%29")
}

pub fn multipart_file(audio: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"song.wav\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(audio);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// Mono 16-bit PCM WAV of silence
pub fn silent_wav(seconds: u32, sample_rate: u32) -> Vec<u8> {
    let data_len = seconds * sample_rate * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.resize(44 + data_len as usize, 0);
    wav
}

/// Test credentials
pub mod fixtures {
    pub const PASSWORD: &str = "TestPassword123!";
    pub const ARTIST: &str = "Dua Lipa";
    pub const LISTENER: &str = "listener";
}
