mod common;

use anyhow::Result;
use reqwest::{header::LOCATION, StatusCode};

#[tokio::test]
async fn signed_in_user_goes_to_localized_page() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login?locale=en"))
        .header("cookie", format!("session_token={}", common::session_token(Some("a@b.com"))))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/en/redirect/third_party_login?email=a@b.com");
    Ok(())
}

#[tokio::test]
async fn quoted_session_cookie_is_accepted() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login?locale=ja"))
        .header(
            "cookie",
            format!("theme=dark; session_token=\"{}\"", common::session_token(Some("a@b.com"))),
        )
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/ja/redirect/third_party_login?email=a@b.com");
    Ok(())
}

#[tokio::test]
async fn bearer_session_and_default_locale() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login"))
        .bearer_auth(common::session_token(Some("a@b.com")))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/en/redirect/third_party_login?email=a@b.com");
    Ok(())
}

#[tokio::test]
async fn missing_session_goes_to_signin() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login?locale=ja"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/signin");
    Ok(())
}

#[tokio::test]
async fn forged_session_goes_to_signin() -> Result<()> {
    let app = common::spawn_app().await?;

    let forged = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &serde_json::json!({"email": "a@b.com", "exp": chrono::Utc::now().timestamp() + 3600}),
        &jsonwebtoken::EncodingKey::from_secret(b"some-other-secret"),
    )?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login?locale=en"))
        .bearer_auth(forged)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/signin");
    Ok(())
}

#[tokio::test]
async fn session_without_email_goes_to_signin() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .get(app.url("/api/redirect/third_party_login?locale=en"))
        .bearer_auth(common::session_token(None))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/signin");
    Ok(())
}
