mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_reports_database_state() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert!(
        res.status() == StatusCode::OK || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "Expected OK or SERVICE_UNAVAILABLE, got {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("success").is_some(), "missing 'success': {}", body);
    assert!(body["data"].get("status").is_some(), "missing status: {}", body);

    Ok(())
}

#[tokio::test]
async fn post_detail_rejects_malformed_ids_without_a_database() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Malformed identifiers 404 before any persistence call, so these hold
    // whether or not DATABASE_URL is configured.
    for bad in ["abc", "0", "-3", "1.5"] {
        let res = client
            .get(format!("{}/posts/{}", server.base_url, bad))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::NOT_FOUND,
            "expected 404 for id {:?}",
            bad
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    Ok(())
}

#[tokio::test]
async fn homepage_responds_with_envelope() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client.get(format!("{}/", server.base_url)).send().await?;

    // Without a database the payload degrades to 503; with one it is the
    // full homepage envelope.
    let status = res.status();
    let body = res.json::<serde_json::Value>().await?;
    match status {
        StatusCode::OK => {
            assert_eq!(body["success"], true);
            for key in ["bio", "social_media", "experiences", "projects", "posts"] {
                assert!(body["data"].get(key).is_some(), "missing {key}: {}", body);
            }
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            assert_eq!(body["success"], false);
        }
        other => panic!("unexpected status {other}: {body}"),
    }

    Ok(())
}
