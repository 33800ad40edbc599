//! Forum threads and replies.
//!
//! Both levels LEFT JOIN the poster so rows with a deleted user still come
//! back, just with null poster fields.

use futures::future;
use sqlx::PgPool;

use super::error::{require_text, DbError};
use super::models::{NewReply, NewThread, Reply, Thread, ThreadWithReplies};

const THREAD_SELECT: &str = r#"
    SELECT t.id, t.text, t.channel_id, t.created_at, t.updated_at,
           t.user_id, u.external_id, u.username, u.profile_photo_url, u.location
      FROM threads t
      LEFT JOIN users u ON t.user_id = u.id
"#;

const REPLY_SELECT: &str = r#"
    SELECT r.id, r.text, r.thread_id, r.created_at,
           r.user_id, u.external_id, u.username, u.profile_photo_url, u.location
      FROM replies r
      LEFT JOIN users u ON r.user_id = u.id
"#;

/// All threads in a channel, newest first, each carrying its replies oldest
/// first.
///
/// Reply sub-fetches run concurrently; `try_join_all` yields results in
/// input order, so each reply set lines up with its thread no matter which
/// fetch finishes first.
pub async fn fetch_threads(db: &PgPool, channel_id: i32) -> Result<Vec<ThreadWithReplies>, DbError> {
    let threads: Vec<Thread> = sqlx::query_as(&format!(
        "{THREAD_SELECT} WHERE t.channel_id = $1 ORDER BY t.created_at DESC, t.id DESC"
    ))
    .bind(channel_id)
    .fetch_all(db)
    .await?;

    let replies =
        future::try_join_all(threads.iter().map(|t| fetch_replies_for(db, t.id))).await?;

    Ok(threads
        .into_iter()
        .zip(replies)
        .map(|(thread, replies)| ThreadWithReplies { thread, replies })
        .collect())
}

async fn fetch_replies_for(db: &PgPool, thread_id: i32) -> Result<Vec<Reply>, DbError> {
    Ok(sqlx::query_as(&format!(
        "{REPLY_SELECT} WHERE r.thread_id = $1 ORDER BY r.created_at, r.id"
    ))
    .bind(thread_id)
    .fetch_all(db)
    .await?)
}

/// Post a new thread.
///
/// Insert-then-reselect inside one transaction: the reselect reuses the
/// channel listing's join shape so the caller gets the same denormalized
/// view, with an empty reply list. A nonexistent poster trips the FK and
/// surfaces as [`DbError::NotFound`].
pub async fn create_thread(db: &PgPool, input: NewThread) -> Result<ThreadWithReplies, DbError> {
    require_text("text", &input.text)?;

    let mut tx = db.begin().await?;

    let thread_id: i32 = sqlx::query_scalar(
        "INSERT INTO threads (text, user_id, channel_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&input.text)
    .bind(input.user_id)
    .bind(input.channel_id)
    .fetch_one(&mut *tx)
    .await?;

    let thread: Thread = sqlx::query_as(&format!("{THREAD_SELECT} WHERE t.id = $1"))
        .bind(thread_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(ThreadWithReplies {
        thread,
        replies: Vec::new(),
    })
}

/// Post a reply to an existing thread.
///
/// Same transactional insert-then-reselect as [`create_thread`]; a missing
/// thread or poster surfaces as [`DbError::NotFound`].
pub async fn create_reply(db: &PgPool, input: NewReply) -> Result<Reply, DbError> {
    require_text("text", &input.text)?;

    let mut tx = db.begin().await?;

    let reply_id: i32 = sqlx::query_scalar(
        "INSERT INTO replies (text, user_id, thread_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(&input.text)
    .bind(input.user_id)
    .bind(input.thread_id)
    .fetch_one(&mut *tx)
    .await?;

    let reply: Reply = sqlx::query_as(&format!("{REPLY_SELECT} WHERE r.id = $1"))
        .bind(reply_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(reply)
}
