use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{Post, PostDetail, PostInput, Reference};
use super::repository::BlogRepository;
use crate::account::{Account, AdminData};
use crate::errors::ServiceError;

/// Post management; authoring requires an [`AdminData`], so only admins can
/// ever become post authors.
pub struct BlogService<R: BlogRepository> {
    repo: Arc<R>,
}

impl<R: BlogRepository> BlogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, author, input), fields(author_id = author.profile.id, title = %input.title))]
    pub async fn add_post(&self, author: &AdminData, input: PostInput) -> Result<Post, ServiceError> {
        models::blog_post::validate_title(&input.title)?;
        let post = self.repo.insert_post(author.profile.id, &input).await?;
        info!(event = "post_created", post_id = post.id, visible = post.is_visible);
        Ok(post)
    }

    /// Overwrite title, content, visibility and tags. `None` when the post
    /// does not exist.
    #[instrument(skip(self, input))]
    pub async fn edit_post(&self, id: i32, input: PostInput) -> Result<Option<Post>, ServiceError> {
        models::blog_post::validate_title(&input.title)?;
        let updated = self.repo.update_post(id, &input).await?;
        if let Some(p) = &updated {
            info!(event = "post_updated", post_id = p.id, visible = p.is_visible);
        }
        Ok(updated)
    }

    /// Remove a post together with its comments, tags, likes and references.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
        let deleted = self.repo.delete_post(id).await?;
        if deleted {
            info!(event = "post_deleted", post_id = id);
        }
        Ok(deleted)
    }

    /// Posts in id order; hidden ones only when `include_hidden`.
    pub async fn fetch_all_posts(&self, include_hidden: bool) -> Result<Vec<Post>, ServiceError> {
        self.repo.list_posts(include_hidden).await
    }

    pub async fn fetch_post_by_id(&self, id: i32) -> Result<Option<Post>, ServiceError> {
        self.repo.find_post(id).await
    }

    pub async fn fetch_post_detail(&self, id: i32) -> Result<Option<PostDetail>, ServiceError> {
        self.repo.load_detail(id).await
    }

    /// Attach a comment by `user`; returns the parent post, or `None` when it
    /// does not exist.
    #[instrument(skip(self, content, user), fields(user_id = user.id()))]
    pub async fn add_comment(&self, post_id: i32, content: &str, user: &Account) -> Result<Option<Post>, ServiceError> {
        let Some(post) = self.repo.find_post(post_id).await? else { return Ok(None) };
        self.repo.insert_comment(post.id, user.id(), content).await?;
        info!(event = "comment_added", post_id);
        Ok(Some(post))
    }

    /// Record that `user` likes the post; returns the like count.
    #[instrument(skip(self, user), fields(user_id = user.id()))]
    pub async fn like_post(&self, post_id: i32, user: &Account) -> Result<Option<u64>, ServiceError> {
        if self.repo.find_post(post_id).await?.is_none() {
            return Ok(None);
        }
        let likes = self.repo.insert_like(post_id, user.id()).await?;
        Ok(Some(likes))
    }

    #[instrument(skip(self, description))]
    pub async fn add_reference(&self, post_id: i32, description: &str, url: &str) -> Result<Option<Reference>, ServiceError> {
        if self.repo.find_post(post_id).await?.is_none() {
            return Ok(None);
        }
        let r = self.repo.insert_reference(post_id, description, url).await?;
        info!(event = "reference_added", post_id, reference_id = r.id);
        Ok(Some(r))
    }
}
