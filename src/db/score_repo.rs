//! Game scores and the per-game leaderboard.

use sqlx::PgPool;

use super::error::DbError;
use super::models::{NewScore, ScoreEntry};

/// Leaderboard cap: a view, not a paginated listing.
const LEADERBOARD_LIMIT: i64 = 10;

const LEADERBOARD_SELECT: &str = r#"
    SELECT s.id, s.value, s.game_id, s.created_at,
           s.user_id, u.external_id, u.username, u.profile_photo_url, u.location
      FROM scores s
      JOIN users u ON s.user_id = u.id
     WHERE s.game_id = $1
     ORDER BY s.value DESC, s.id
     LIMIT $2
"#;

/// Top 10 scores for a game, highest first, ties broken by score id so equal
/// values keep a stable order across re-runs.
pub async fn top_scores(db: &PgPool, game_id: i32) -> Result<Vec<ScoreEntry>, DbError> {
    Ok(sqlx::query_as(LEADERBOARD_SELECT)
        .bind(game_id)
        .bind(LEADERBOARD_LIMIT)
        .fetch_all(db)
        .await?)
}

/// Record a score and return the updated leaderboard for that game.
///
/// The contract is "give me the leaderboard after my submission", not the
/// inserted row, so the read-back runs in the insert's transaction and uses
/// the same shape and cap as [`top_scores`]. Scoring for a nonexistent user
/// surfaces as [`DbError::NotFound`].
pub async fn create_score(db: &PgPool, input: NewScore) -> Result<Vec<ScoreEntry>, DbError> {
    let mut tx = db.begin().await?;

    sqlx::query("INSERT INTO scores (value, user_id, game_id) VALUES ($1, $2, $3)")
        .bind(input.value)
        .bind(input.user_id)
        .bind(input.game_id)
        .execute(&mut *tx)
        .await?;

    let leaderboard: Vec<ScoreEntry> = sqlx::query_as(LEADERBOARD_SELECT)
        .bind(input.game_id)
        .bind(LEADERBOARD_LIMIT)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(leaderboard)
}
