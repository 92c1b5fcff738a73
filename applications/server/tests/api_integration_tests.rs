/// API integration tests
/// Tests complete HTTP request/response cycles with a real database and audio dir
mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use cadence_core::{GenreSet, Role};
use common::{authed, fixtures, multipart_file, silent_wav, TestApp, BOUNDARY};
use serde_json::{json, Value};

async fn login(app: &TestApp, username: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri("/api/auth/login")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "username": username, "password": password }).to_string(),
        ))
        .unwrap();
    app.send(request).await
}

async fn register(app: &TestApp, kind: &str, name: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(format!(
            "/api/{}?name={}&photo=https%3A%2F%2Fphoto&password={}",
            kind,
            common::encode(name),
            fixtures::PASSWORD
        ))
        .method("POST")
        .body(Body::empty())
        .unwrap();
    app.send(request).await
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for uri in ["/api/songs", "/api/playlists", "/api/users/whoami", "/api/search?name=a"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert!(body["error"].is_string());
    }

    let (status, _) = app.get("/api/songs", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new().await;
    app.account(fixtures::LISTENER, Role::User).await;

    let refresh = app
        .state
        .auth_service
        .create_refresh_token(fixtures::LISTENER)
        .unwrap();
    let (status, _) = app.get("/api/songs", &refresh).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_genres_are_public() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["genre_set"], "current");

    let (status, body) = app
        .send(Request::builder().uri("/api/genres").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    let genres = body.as_array().unwrap();
    assert_eq!(genres.len(), 36);
    assert_eq!(genres[0], "Pop");
    assert!(genres.contains(&json!("R&B (Rhythm and Blues)")));
}

#[tokio::test]
async fn test_legacy_genre_set() {
    let app = TestApp::with_genre_set(GenreSet::Legacy).await;

    let (_, body) = app
        .send(Request::builder().uri("/api/genres").body(Body::empty()).unwrap())
        .await;
    let genres = body.as_array().unwrap();
    assert_eq!(genres.len(), 30);
    assert!(!genres.contains(&json!("Phonk")));

    let token = app.account(fixtures::ARTIST, Role::Artist).await;
    let (status, _) = app
        .upload_song(&token, "Night Drive", "Phonk", &silent_wav(1, 8000))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/songs/genres/Phonk", &token).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_register_login_and_refresh() {
    let app = TestApp::new().await;

    let (status, body) = register(&app, "users", fixtures::LISTENER).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], fixtures::LISTENER);
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());

    let (status, body) = register(&app, "artists", fixtures::ARTIST).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "artist");
    assert_eq!(body["uploaded_songs"], json!([]));

    // Names are unique across users and artists
    let (status, _) = register(&app, "artists", fixtures::LISTENER).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = login(&app, fixtures::LISTENER, "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = login(&app, "nobody", fixtures::PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, tokens) = login(&app, fixtures::ARTIST, fixtures::PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tokens["token_type"], "Bearer");
    let access = tokens["access_token"].as_str().unwrap();

    let (status, me) = app.get("/api/users/whoami", access).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, json!({ "name": fixtures::ARTIST, "role": "artist" }));

    let request = Request::builder()
        .uri("/api/auth/refresh")
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "refresh_token": tokens["refresh_token"] }).to_string(),
        ))
        .unwrap();
    let (status, refreshed) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(refreshed["access_token"].is_string());
}

#[tokio::test]
async fn test_song_lifecycle() {
    let app = TestApp::new().await;
    let artist = app.account(fixtures::ARTIST, Role::Artist).await;
    let listener = app.account(fixtures::LISTENER, Role::User).await;
    let audio = silent_wav(2, 8000);

    let (status, song) = app.upload_song(&artist, "Levitating", "Pop", &audio).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(song["name"], "Levitating");
    assert_eq!(song["artist"], fixtures::ARTIST);
    assert_eq!(song["genre"], "Pop");
    assert_eq!(song["streams"], 0);
    let duration = song["seconds_duration"].as_f64().unwrap();
    assert!((duration - 2.0).abs() < 0.1, "duration {duration}");

    let (status, fetched) = app.get("/api/songs/Levitating", &listener).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, song);

    for _ in 0..3 {
        let (status, _) = app.patch("/api/songs/Levitating/streams", &listener).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
    let (_, fetched) = app.get("/api/songs/Levitating", &listener).await;
    assert_eq!(fetched["streams"], 3);

    let (_, all) = app.get("/api/songs", &listener).await;
    assert_eq!(names(&all), vec!["Levitating"]);
    let (_, pop) = app.get("/api/songs/genres/Pop", &listener).await;
    assert_eq!(names(&pop), vec!["Levitating"]);
    let (status, rock) = app.get("/api/songs/genres/Rock", &listener).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rock, json!([]));
    let (status, _) = app.get("/api/songs/genres/Polka", &listener).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, profile) = app
        .get(&format!("/api/artists/{}", common::encode(fixtures::ARTIST)), &listener)
        .await;
    assert_eq!(profile["uploaded_songs"], json!(["Levitating"]));

    let (status, _) = app.delete("/api/songs/Levitating", &artist).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, _) = app.get("/api/songs/Levitating", &listener).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete("/api/songs/Levitating", &artist).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.patch("/api/songs/Levitating/streams", &listener).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/api/stream/Levitating", &listener).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, profile) = app
        .get(&format!("/api/artists/{}", common::encode(fixtures::ARTIST)), &listener)
        .await;
    assert_eq!(profile["uploaded_songs"], json!([]));

    // Names are reusable after delete
    let (status, song) = app.upload_song(&artist, "Levitating", "Dance", &audio).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(song["streams"], 0);
}

#[tokio::test]
async fn test_create_song_rejections() {
    let app = TestApp::new().await;
    let artist = app.account(fixtures::ARTIST, Role::Artist).await;
    let audio = silent_wav(1, 8000);

    let (status, _) = app.upload_song(&artist, "Levitating", "Pop", &audio).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.upload_song(&artist, "Levitating", "Rock", &audio).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Levitating"));

    let (status, _) = app.upload_song(&artist, "Physical", "pop", &audio).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.get("/api/songs/Physical", &artist).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.upload_song(&artist, "", "Pop", &audio).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Multipart body without a file field
    let request = authed(Method::POST, "/api/songs?name=Physical&genre=Pop", &artist)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(format!("--{}--\r\n", BOUNDARY)))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Token for an account that does not exist
    let ghost = app.token("ghost");
    let (status, _) = app.upload_song(&ghost, "Physical", "Pop", &audio).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, all) = app.get("/api/songs", &artist).await;
    assert_eq!(names(&all), vec!["Levitating"]);
}

#[tokio::test]
async fn test_plain_user_cannot_upload_regardless_of_input() {
    let app = TestApp::new().await;
    let listener = app.account(fixtures::LISTENER, Role::User).await;
    let audio = silent_wav(1, 8000);

    let (status, _) = app.upload_song(&listener, "Levitating", "Pop", &audio).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.upload_song(&listener, "", "Polka", &audio).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let request = authed(Method::POST, "/api/songs?name=x&genre=Pop", &listener)
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, all) = app.get("/api/songs", &listener).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_stream_supports_ranges() {
    let app = TestApp::new().await;
    let artist = app.account(fixtures::ARTIST, Role::Artist).await;
    let audio = silent_wav(1, 8000);
    app.upload_song(&artist, "Levitating", "Pop", &audio).await;

    let response = tower::util::ServiceExt::oneshot(
        app.router.clone(),
        authed(Method::GET, "/api/stream/Levitating", &artist)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), audio.as_slice());

    let response = tower::util::ServiceExt::oneshot(
        app.router.clone(),
        authed(Method::GET, "/api/stream/Levitating", &artist)
            .header(header::RANGE, "bytes=0-3")
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response.headers()[header::CONTENT_RANGE],
        format!("bytes 0-3/{}", audio.len()).as_str()
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), b"RIFF");
}

#[tokio::test]
async fn test_playlists() {
    let app = TestApp::new().await;
    let owner = app.account(fixtures::LISTENER, Role::User).await;
    let other = app.account("someone-else", Role::User).await;

    let (status, playlist) = app
        .send_json(
            Method::POST,
            "/api/playlists?name=Summer&photo=p&description=hits",
            &owner,
            &json!(["Levitating", "Physical"]),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(playlist["owner"], fixtures::LISTENER);
    assert_eq!(playlist["song_names"], json!(["Levitating", "Physical"]));

    let (status, _) = app
        .send_json(Method::POST, "/api/playlists?name=Summer", &owner, &json!([]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, me) = app
        .get(&format!("/api/users/{}", fixtures::LISTENER), &owner)
        .await;
    assert_eq!(me["playlists"], json!(["Summer"]));

    let (status, _) = app
        .send_json(Method::PUT, "/api/playlists/Summer?new_name=Winter", &other, &json!([]))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send_json(
            Method::PUT,
            "/api/playlists/Summer?new_name=Winter&description=cold",
            &owner,
            &json!(["Physical"]),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/api/playlists/Summer", &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, winter) = app.get("/api/playlists/Winter", &owner).await;
    assert_eq!(winter["description"], "cold");
    assert_eq!(winter["photo"], "p");
    assert_eq!(winter["song_names"], json!(["Physical"]));

    let (_, selected) = app.get("/api/playlists/selected/Winter,Missing", &other).await;
    assert_eq!(names(&selected), vec!["Winter"]);

    let (status, _) = app.delete("/api/playlists/Winter", &other).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.delete("/api/playlists/Winter", &owner).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, _) = app.delete("/api/playlists/Winter", &owner).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search() {
    let app = TestApp::new().await;
    let artist = app.account("Levi", Role::Artist).await;
    app.account("levitator", Role::User).await;
    app.upload_song(&artist, "Levitating", "Pop", &silent_wav(1, 8000))
        .await;
    app.send_json(Method::POST, "/api/playlists?name=Levels", &artist, &json!([]))
        .await;

    let (status, results) = app.get("/api/search?name=LEV", &artist).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&results["artists"]), vec!["Levi"]);
    assert_eq!(names(&results["users"]), vec!["levitator"]);
    assert_eq!(names(&results["songs"]), vec!["Levitating"]);
    assert_eq!(names(&results["playlists"]), vec!["Levels"]);

    let (status, _) = app.get("/api/search?name=", &artist).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_account_keeps_songs() {
    let app = TestApp::new().await;
    let artist = app.account(fixtures::ARTIST, Role::Artist).await;
    let listener = app.account(fixtures::LISTENER, Role::User).await;
    app.upload_song(&artist, "Levitating", "Pop", &silent_wav(1, 8000))
        .await;

    let uri = format!("/api/users/{}", common::encode(fixtures::ARTIST));
    let (status, _) = app.delete(&uri, &listener).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    let (status, _) = app.delete(&uri, &listener).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The old token no longer resolves to an artist
    let (status, _) = app.get("/api/users/whoami", &artist).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app
        .upload_song(&artist, "Physical", "Pop", &silent_wav(1, 8000))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, song) = app.get("/api/songs/Levitating", &listener).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(song["artist"], fixtures::ARTIST);
}

#[tokio::test]
async fn test_upload_body_limit() {
    let mut app = TestApp::new().await;
    app.router = cadence_server::create_router(app.state.clone(), 1024);
    let artist = app.account(fixtures::ARTIST, Role::Artist).await;

    let request = authed(Method::POST, "/api/songs?name=Big&genre=Pop", &artist)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_file(&silent_wav(1, 8000))))
        .unwrap();
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
