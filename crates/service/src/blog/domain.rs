use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub type Post = models::blog_post::Model;
pub type Reference = models::external_reference::Model;

/// Fields an admin submits when creating or editing a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub make_visible: bool,
}

impl PostInput {
    /// Build from a comma separated tag field as typed into a form.
    pub fn with_tag_line(title: String, content: String, tag_line: &str, make_visible: bool) -> Self {
        let tags = tag_line.split(',').map(str::to_string).collect();
        Self { title, content, tags, make_visible }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    pub comment_date: DateTime<FixedOffset>,
    pub user_id: i32,
    pub author_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: i32,
    pub display_name: String,
}

/// A post with everything the detail page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub author: Option<AuthorView>,
    pub tags: Vec<String>,
    pub comments: Vec<CommentView>,
    pub references: Vec<Reference>,
    pub likes: u64,
}
