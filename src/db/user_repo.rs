//! Users: lookup by Discord id and registration.

use sqlx::PgPool;

use super::error::{require_text, DbError};
use super::models::{NewUser, Score, User, UserWithScores};

/// Look up a user by their Discord id and attach their score history.
///
/// Returns `Ok(None)` when no such user exists. Scores are grouped by game
/// and ranked within each game, ties broken by score id so re-runs are
/// deterministic. Two sequential reads; no transaction since nothing is
/// written.
pub async fn fetch_user(db: &PgPool, external_id: &str) -> Result<Option<UserWithScores>, DbError> {
    require_text("idDiscord", external_id)?;

    let user: Option<User> = sqlx::query_as(
        r#"
        SELECT u.id, u.external_id, u.username, u.profile_photo_url, u.location
          FROM users u
         WHERE u.external_id = $1
        "#,
    )
    .bind(external_id)
    .fetch_optional(db)
    .await?;

    let Some(user) = user else {
        return Ok(None);
    };

    let scores: Vec<Score> = sqlx::query_as(
        r#"
        SELECT s.id, s.value, s.user_id, s.game_id, s.created_at
          FROM scores s
         WHERE s.user_id = $1
         ORDER BY s.game_id, s.value DESC, s.id
        "#,
    )
    .bind(user.id)
    .fetch_all(db)
    .await?;

    Ok(Some(UserWithScores { user, scores }))
}

/// Register a new user.
///
/// A single `INSERT .. RETURNING` — no follow-up read is needed, and a fresh
/// user has no scores by construction. A duplicate Discord id surfaces as
/// [`DbError::Conflict`].
pub async fn create_user(db: &PgPool, input: NewUser) -> Result<UserWithScores, DbError> {
    require_text("idDiscord", &input.external_id)?;
    require_text("username", &input.username)?;
    require_text("profilePhotoUrl", &input.profile_photo_url)?;
    require_text("location", &input.location)?;

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (external_id, username, profile_photo_url, location)
        VALUES ($1, $2, $3, $4)
        RETURNING id, external_id, username, profile_photo_url, location
        "#,
    )
    .bind(&input.external_id)
    .bind(&input.username)
    .bind(&input.profile_photo_url)
    .bind(&input.location)
    .fetch_one(db)
    .await?;

    Ok(UserWithScores {
        user,
        scores: Vec::new(),
    })
}
