use async_trait::async_trait;

use super::domain::{Post, PostDetail, PostInput, Reference};
use crate::errors::ServiceError;

/// Persistence seam for posts and their dependents.
///
/// Methods that write more than one row run inside a single transaction.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    async fn insert_post(&self, author_id: i32, input: &PostInput) -> Result<Post, ServiceError>;
    async fn update_post(&self, id: i32, input: &PostInput) -> Result<Option<Post>, ServiceError>;
    async fn delete_post(&self, id: i32) -> Result<bool, ServiceError>;

    async fn list_posts(&self, include_hidden: bool) -> Result<Vec<Post>, ServiceError>;
    async fn find_post(&self, id: i32) -> Result<Option<Post>, ServiceError>;
    async fn load_detail(&self, id: i32) -> Result<Option<PostDetail>, ServiceError>;

    async fn insert_comment(&self, post_id: i32, user_id: i32, content: &str) -> Result<(), ServiceError>;
    async fn insert_like(&self, post_id: i32, user_id: i32) -> Result<u64, ServiceError>;
    async fn insert_reference(&self, post_id: i32, description: &str, url: &str) -> Result<Reference, ServiceError>;
}
