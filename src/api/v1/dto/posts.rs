/*
 * Responsibility
 * - Posts/comments request/response DTOs
 * - The author is always the authenticated identity, never a body field
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(content) = &self.content
            && content.trim().is_empty()
        {
            return Err("content cannot be empty");
        }

        Ok(())
    }
}

/// Query string for the public post listing.
///
/// Absent parameters mean "the newest DEFAULT_LIMIT posts"; clients page
/// through older posts with `?limit=&offset=`.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListPostsQuery {
    pub const DEFAULT_LIMIT: i64 = 50;
    pub const MAX_LIMIT: i64 = 200;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

impl AddCommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.content.trim().is_empty() {
            return Err("content is required");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Only present on endpoints that return the comment thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<CommentResponse>>,
}

#[derive(Debug, Serialize)]
pub struct PostsResponse {
    pub posts: Vec<PostResponse>,
}

#[derive(Debug, Serialize)]
pub struct CommentsResponse {
    pub comments: Vec<CommentResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_post_requires_title_and_content() {
        let ok = CreatePostRequest {
            title: "Hello".into(),
            content: "First post".into(),
        };
        assert!(ok.validate().is_ok());

        let blank_title = CreatePostRequest {
            title: "   ".into(),
            content: "body".into(),
        };
        assert!(blank_title.validate().is_err());

        let blank_content = CreatePostRequest {
            title: "Hello".into(),
            content: "".into(),
        };
        assert!(blank_content.validate().is_err());
    }

    #[test]
    fn update_post_accepts_partial_but_not_blank_fields() {
        let title_only = UpdatePostRequest {
            title: Some("New title".into()),
            content: None,
        };
        assert!(title_only.validate().is_ok());

        // Omitting both fields is a no-op update, not an error.
        let empty = UpdatePostRequest {
            title: None,
            content: None,
        };
        assert!(empty.validate().is_ok());

        let blank = UpdatePostRequest {
            title: Some("  ".into()),
            content: None,
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn list_query_defaults_to_newest_fifty() {
        let q = ListPostsQuery::default();
        assert_eq!(q.limit(), 50);
        assert_eq!(q.offset(), 0);
    }

    #[test]
    fn list_query_clamps_out_of_range_values() {
        let q = ListPostsQuery {
            limit: Some(100_000),
            offset: Some(-3),
        };
        assert_eq!(q.limit(), ListPostsQuery::MAX_LIMIT);
        assert_eq!(q.offset(), 0);

        let q = ListPostsQuery {
            limit: Some(0),
            offset: Some(50),
        };
        assert_eq!(q.limit(), 1);
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn add_comment_requires_content() {
        assert!(AddCommentRequest { content: "nice".into() }.validate().is_ok());
        assert!(AddCommentRequest { content: " ".into() }.validate().is_err());
    }
}
