use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// A comment embedded in a post's comment list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// A post row. Likes and comments are ordered lists embedded in the row,
/// newest first.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub text: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub likes: Json<Vec<Uuid>>,
    pub comments: Json<Vec<Comment>>,
    #[serde(rename = "date", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, text, name, avatar, likes, comments, created_at";

impl Post {
    pub async fn list(db: &PgPool) -> sqlx::Result<Vec<Post>> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &PgPool, id: Uuid) -> sqlx::Result<Option<Post>> {
        sqlx::query_as::<_, Post>(&format!("SELECT {COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        text: &str,
        name: Option<&str>,
        avatar: Option<&str>,
    ) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Persist a rewritten like list. Last write wins on concurrent edits.
    pub async fn set_likes(db: &PgPool, id: Uuid, likes: &[Uuid]) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET likes = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(Json(likes))
        .fetch_one(db)
        .await
    }

    /// Persist a rewritten comment list. Last write wins on concurrent edits.
    pub async fn set_comments(db: &PgPool, id: Uuid, comments: &[Comment]) -> sqlx::Result<Post> {
        sqlx::query_as::<_, Post>(&format!(
            "UPDATE posts SET comments = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(Json(comments))
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_wire_field_names() {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            text: "hello".into(),
            name: Some("Ann".into()),
            avatar: None,
            likes: Json(vec![]),
            comments: Json(vec![]),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("user").is_some());
        assert!(json.get("date").is_some());
        assert!(json.get("user_id").is_none());
        assert_eq!(json["likes"], serde_json::json!([]));
    }
}
