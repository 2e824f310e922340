mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn relays_upstream_json() -> Result<()> {
    let releases = json!([{"tag_name": "v1.2.0", "assets": []}, {"tag_name": "v1.1.0", "assets": []}]);
    let upstream = common::spawn_upstream(StatusCode::OK, releases.clone()).await?;
    let url = upstream.releases_url.clone();
    let app = common::spawn_app_with(|config| config.github.releases_url = url).await?;

    let res = app.client.get(app.url("/api/github/release")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, releases);
    assert!(upstream.seen_authorization.lock().unwrap().is_none());
    Ok(())
}

#[tokio::test]
async fn configured_token_is_sent() -> Result<()> {
    let upstream = common::spawn_upstream(StatusCode::OK, json!([])).await?;
    let url = upstream.releases_url.clone();
    let app = common::spawn_app_with(|config| {
        config.github.releases_url = url;
        config.github.access_token = Some("ghp_test".to_string());
    })
    .await?;

    let res = app.client.get(app.url("/api/github/release")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        upstream.seen_authorization.lock().unwrap().as_deref(),
        Some("Bearer ghp_test")
    );
    Ok(())
}

#[tokio::test]
async fn upstream_error_status_becomes_500() -> Result<()> {
    let upstream = common::spawn_upstream(StatusCode::NOT_FOUND, json!({"message": "Not Found"})).await?;
    let url = upstream.releases_url.clone();
    let app = common::spawn_app_with(|config| config.github.releases_url = url).await?;

    let res = app.client.get(app.url("/api/github/release")).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Failed to fetch releases");
    assert_eq!(body["message"], "GitHub API responded with status 404 Not Found");
    Ok(())
}

#[tokio::test]
async fn unreachable_upstream_becomes_500() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let app = common::spawn_app_with(|config| {
        config.github.releases_url = format!("http://127.0.0.1:{}/releases", port);
    })
    .await?;

    let res = app.client.get(app.url("/api/github/release")).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "Failed to fetch releases");
    assert!(body["message"].as_str().unwrap().starts_with("GitHub request failed"));
    Ok(())
}
