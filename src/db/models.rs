//! Row and result-shape types for the store.
//!
//! Serialized field names follow the portal front-end's contract
//! (`idUser`, `idDiscord`, `profilePhotoUrl`, ...); the Rust side keeps the
//! normalized column names. Poster fields on threads and replies are
//! `Option` because the poster may have been deleted (nullable FK).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "idUser")]
    pub id: i32,
    #[serde(rename = "idDiscord")]
    pub external_id: String,
    pub username: String,
    pub profile_photo_url: String,
    pub location: String,
}

/// A user plus their full score history, grouped by game and ranked within
/// each game.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithScores {
    #[serde(flatten)]
    pub user: User,
    pub scores: Vec<Score>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    #[serde(rename = "idScore")]
    pub id: i32,
    pub value: i32,
    #[serde(rename = "idUser")]
    pub user_id: i32,
    #[serde(rename = "idGame")]
    pub game_id: i32,
    pub created_at: DateTime<Utc>,
}

/// One leaderboard row: a score joined with its poster's profile. Scores
/// always have an owner, so poster fields are non-optional here.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    #[serde(rename = "idScore")]
    pub id: i32,
    pub value: i32,
    #[serde(rename = "idGame")]
    pub game_id: i32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "idUser")]
    pub user_id: i32,
    #[serde(rename = "idDiscord")]
    pub external_id: String,
    pub username: String,
    pub profile_photo_url: String,
    pub location: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    #[serde(rename = "idThread")]
    pub id: i32,
    pub text: String,
    #[serde(rename = "idChannel")]
    pub channel_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "idUser")]
    pub user_id: Option<i32>,
    #[serde(rename = "idDiscord")]
    pub external_id: Option<String>,
    pub username: Option<String>,
    pub profile_photo_url: Option<String>,
    pub location: Option<String>,
}

/// A thread with its replies in chronological order.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadWithReplies {
    #[serde(flatten)]
    pub thread: Thread,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(rename = "idReply")]
    pub id: i32,
    pub text: String,
    #[serde(rename = "idThread")]
    pub thread_id: i32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "idUser")]
    pub user_id: Option<i32>,
    #[serde(rename = "idDiscord")]
    pub external_id: Option<String>,
    pub username: Option<String>,
    pub profile_photo_url: Option<String>,
    pub location: Option<String>,
}

//////////////////////////////////////////////////
// Creation inputs
//////////////////////////////////////////////////

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(rename = "idDiscord")]
    pub external_id: String,
    pub username: String,
    pub profile_photo_url: String,
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewThread {
    pub text: String,
    #[serde(rename = "idUser")]
    pub user_id: i32,
    #[serde(rename = "idChannel")]
    pub channel_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReply {
    pub text: String,
    #[serde(rename = "idUser")]
    pub user_id: i32,
    #[serde(rename = "idThread")]
    pub thread_id: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScore {
    pub value: i32,
    #[serde(rename = "idUser")]
    pub user_id: i32,
    #[serde(rename = "idGame")]
    pub game_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serializes_with_front_end_field_names() {
        let user = UserWithScores {
            user: User {
                id: 7,
                external_id: "1234567890".into(),
                username: "karen".into(),
                profile_photo_url: "https://cdn.example/karen.png".into(),
                location: "Austin".into(),
            },
            scores: vec![],
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["idUser"], 7);
        assert_eq!(json["idDiscord"], "1234567890");
        assert_eq!(json["profilePhotoUrl"], "https://cdn.example/karen.png");
        assert_eq!(json["scores"], serde_json::json!([]));
    }

    #[test]
    fn new_thread_deserializes_front_end_payload() {
        let input: NewThread =
            serde_json::from_str(r#"{"text":"hi","idUser":3,"idChannel":12}"#).unwrap();
        assert_eq!(input.user_id, 3);
        assert_eq!(input.channel_id, 12);
    }
}
