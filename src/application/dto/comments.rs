use crate::domain::comment::EditorialComment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorialCommentDto {
    pub id: i64,
    pub article_id: i64,
    pub author_id: i64,
    pub body: String,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EditorialComment> for EditorialCommentDto {
    fn from(comment: EditorialComment) -> Self {
        Self {
            id: comment.id.into(),
            article_id: comment.article_id.into(),
            author_id: comment.author_id.into(),
            body: comment.body.into(),
            is_internal: comment.is_internal,
            created_at: comment.created_at,
        }
    }
}
