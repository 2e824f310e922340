mod common;

use anyhow::Result;
use onlysaid_api::database::Table;
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn seeded_app() -> Result<common::TestApp> {
    let app = common::spawn_app().await?;
    app.gateway
        .seed(
            Table::Users,
            json!({
                "id": "8d1f6c2e-0000-4000-8000-000000000001",
                "username": "alice",
                "email": "alice@example.com",
                "avatar": "https://cdn.example.com/alice.png"
            })
            .as_object()
            .cloned()
            .unwrap(),
        )
        .await;
    Ok(app)
}

#[tokio::test]
async fn get_user_by_id_requires_param() -> Result<()> {
    let app = seeded_app().await?;

    let res = app.client.get(app.url("/api/user/get_user_by_id")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "User ID is required"}));
    Ok(())
}

#[tokio::test]
async fn get_user_by_id_unknown_is_404() -> Result<()> {
    let app = seeded_app().await?;

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_id?user_id=does-not-exist"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"exists": false}));
    Ok(())
}

#[tokio::test]
async fn get_user_by_id_returns_summary() -> Result<()> {
    let app = seeded_app().await?;

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_id?user_id=8d1f6c2e-0000-4000-8000-000000000001"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await?,
        json!({
            "exists": true,
            "user": {
                "id": "8d1f6c2e-0000-4000-8000-000000000001",
                "name": "alice",
                "email": "alice@example.com"
            }
        })
    );
    Ok(())
}

#[tokio::test]
async fn get_user_by_username_returns_profile() -> Result<()> {
    let app = seeded_app().await?;

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_username?username=alice"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["exists"], true);
    let user = &body["user"];
    assert_eq!(user["name"], "alice");
    assert_eq!(user["username"], user["name"]);
    assert_eq!(user["avatar"], "https://cdn.example.com/alice.png");
    assert_eq!(user["email"], "alice@example.com");
    Ok(())
}

#[tokio::test]
async fn get_user_by_username_requires_param() -> Result<()> {
    let app = seeded_app().await?;

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_username?username="))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Username is required"}));

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_username?username=bob"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?, json!({"exists": false}));
    Ok(())
}

#[tokio::test]
async fn lookup_failure_is_500() -> Result<()> {
    let app = seeded_app().await?;
    app.gateway.fail_with(Some("timeout")).await;

    let res = app
        .client
        .get(app.url("/api/user/get_user_by_username?username=alice"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await?, json!({"error": "Failed to fetch user"}));
    Ok(())
}
