//! Content data-layer properties against a real database. These run only
//! when DATABASE_URL is configured; otherwise they skip.

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use folio_api::content::{self, experiences::ExperienceInput, posts::PostInput};
use folio_api::database::{migrate, service};
use folio_api::middleware::AuthUser;

async fn test_pool() -> Result<Option<PgPool>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(None);
    };
    let pool = PgPoolOptions::new().max_connections(2).connect(&url).await?;
    migrate::run(&pool).await?;
    Ok(Some(pool))
}

async fn seed_owner(pool: &PgPool, email: &str) -> Result<AuthUser> {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO users (name, email, created_at, updated_at)
         VALUES ($1, $2, now(), now())
         ON CONFLICT (email) DO UPDATE SET updated_at = now()
         RETURNING id",
    )
    .bind("Test Owner")
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(AuthUser {
        id,
        name: "Test Owner".to_string(),
        email: email.to_string(),
        avatar: None,
    })
}

/// Unique explicit ids per run so suites can re-run against the same database
fn fresh_id() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

#[tokio::test]
async fn upsert_with_explicit_id_inserts_then_updates() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-posts@example.com").await?;
    let id = fresh_id();

    let input = PostInput {
        id: Some(id),
        title: "First title".to_string(),
        content: "hello world".to_string(),
        publish: false,
    };
    content::posts::upsert(&pool, &owner, &input).await?;

    let created = content::posts::find_by_id(&pool, id).await?.expect("row");
    assert_eq!(created.title, "First title");
    assert_eq!(created.status, "draft");
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(created.user_id, Some(owner.id));

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let input = PostInput {
        id: Some(id),
        title: "Second title".to_string(),
        content: "hello again".to_string(),
        publish: true,
    };
    content::posts::upsert(&pool, &owner, &input).await?;

    let updated = content::posts::find_by_id(&pool, id).await?.expect("row");
    assert_eq!(updated.title, "Second title");
    assert_eq!(updated.status, "published");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    content::posts::delete(&pool, id).await?;
    Ok(())
}

#[tokio::test]
async fn upsert_same_values_twice_keeps_one_row_and_advances_updated_at() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-posts-2@example.com").await?;
    let id = fresh_id();

    let input = PostInput {
        id: Some(id),
        title: "Stable".to_string(),
        content: "same values".to_string(),
        publish: false,
    };
    content::posts::upsert(&pool, &owner, &input).await?;
    let first = content::posts::find_by_id(&pool, id).await?.expect("row");

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    content::posts::upsert(&pool, &owner, &input).await?;

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await?;
    assert_eq!(count, 1);

    let second = content::posts::find_by_id(&pool, id).await?.expect("row");
    assert_eq!(second.title, first.title);
    assert!(second.updated_at > first.updated_at);

    content::posts::delete(&pool, id).await?;
    Ok(())
}

#[tokio::test]
async fn ongoing_experience_stores_null_end_date() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-exp@example.com").await?;
    let ongoing_id = fresh_id();
    let finished_id = ongoing_id + 1;

    let start = chrono::Utc::now() - chrono::Duration::days(400);
    let ongoing = ExperienceInput {
        id: Some(ongoing_id),
        title: "Engineer".to_string(),
        company: "Acme".to_string(),
        company_url: None,
        start_date: start,
        end_date: None,
        description: "Still here".to_string(),
    };
    let finished = ExperienceInput {
        id: Some(finished_id),
        end_date: Some(start + chrono::Duration::days(100)),
        description: "Moved on".to_string(),
        ..ongoing.clone()
    };

    content::experiences::upsert(&pool, &owner, &ongoing).await?;
    content::experiences::upsert(&pool, &owner, &finished).await?;

    let ongoing_row = content::experiences::store()
        .find_by_id(&pool, ongoing_id)
        .await?
        .expect("row");
    let finished_row = content::experiences::store()
        .find_by_id(&pool, finished_id)
        .await?
        .expect("row");

    assert!(ongoing_row.is_ongoing());
    assert!(ongoing_row.end_date.is_none());
    assert!(!finished_row.is_ongoing());
    assert!(finished_row.end_date.is_some());

    content::experiences::delete(&pool, ongoing_id).await?;
    content::experiences::delete(&pool, finished_id).await?;
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-del@example.com").await?;
    let id = fresh_id();

    let input = PostInput {
        id: Some(id),
        title: "Doomed".to_string(),
        content: "gone soon".to_string(),
        publish: false,
    };
    content::posts::upsert(&pool, &owner, &input).await?;

    content::posts::delete(&pool, id).await?;
    // Second delete of the same id is still a success
    content::posts::delete(&pool, id).await?;

    assert!(content::posts::find_by_id(&pool, id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn any_verified_email_matches_and_profile_is_refreshed() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-match@example.com").await?;

    // The matching address is deliberately not first in the candidate list.
    let candidates = vec![
        "unknown@example.com".to_string(),
        "owner-match@example.com".to_string(),
    ];
    let user = service::find_user_by_emails(&pool, &candidates)
        .await?
        .expect("second email should match");
    assert_eq!(user.id, owner.id);

    let no_match = service::find_user_by_emails(&pool, &["nobody@example.com".to_string()]).await?;
    assert!(no_match.is_none());

    let refreshed = service::refresh_user_profile(
        &pool,
        user.id,
        "Refreshed Name",
        Some("https://example.com/new-avatar.png"),
    )
    .await?;
    assert_eq!(refreshed.name, "Refreshed Name");
    assert_eq!(
        refreshed.avatar.as_deref(),
        Some("https://example.com/new-avatar.png")
    );
    assert!(refreshed.updated_at >= user.updated_at);

    Ok(())
}

#[tokio::test]
async fn sequence_assigned_inserts_survive_explicit_ids() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let owner = seed_owner(&pool, "owner-seq@example.com").await?;
    let explicit_id = fresh_id();

    let with_id = PostInput {
        id: Some(explicit_id),
        title: "Explicit".to_string(),
        content: "explicit id".to_string(),
        publish: false,
    };
    content::posts::upsert(&pool, &owner, &with_id).await?;

    // The sequence was bumped past the explicit id, so a plain insert
    // must not collide with it.
    let without_id = PostInput {
        id: None,
        title: "Assigned".to_string(),
        content: "sequence id".to_string(),
        publish: false,
    };
    content::posts::upsert(&pool, &owner, &without_id).await?;

    let (assigned_id,): (i64,) =
        sqlx::query_as("SELECT id FROM posts WHERE title = 'Assigned' ORDER BY id DESC LIMIT 1")
            .fetch_one(&pool)
            .await?;
    assert!(assigned_id > explicit_id);

    content::posts::delete(&pool, explicit_id).await?;
    content::posts::delete(&pool, assigned_id).await?;
    Ok(())
}
