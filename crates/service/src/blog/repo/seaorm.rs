use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::blog::domain::{AuthorView, CommentView, Post, PostDetail, PostInput, Reference};
use crate::blog::repository::BlogRepository;
use crate::errors::ServiceError;
use models::{blog_post, comment, external_reference, post_like, tag, user};

pub struct SeaOrmBlogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmBlogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl BlogRepository for SeaOrmBlogRepository {
    async fn insert_post(&self, author_id: i32, input: &PostInput) -> Result<Post, ServiceError> {
        let txn = self.db.begin().await?;
        let post = blog_post::create(&txn, author_id, &input.title, &input.content, input.make_visible).await?;
        tag::replace_for_post(&txn, post.id, &input.tags).await?;
        txn.commit().await?;
        Ok(post)
    }

    async fn update_post(&self, id: i32, input: &PostInput) -> Result<Option<Post>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(found) = blog_post::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        let mut am: blog_post::ActiveModel = found.into();
        am.title = Set(input.title.trim().to_string());
        am.content = Set(input.content.clone());
        am.is_visible = Set(input.make_visible);
        let updated = am.update(&txn).await?;
        tag::replace_for_post(&txn, id, &input.tags).await?;
        txn.commit().await?;
        Ok(Some(updated))
    }

    async fn delete_post(&self, id: i32) -> Result<bool, ServiceError> {
        let res = blog_post::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn list_posts(&self, include_hidden: bool) -> Result<Vec<Post>, ServiceError> {
        let mut q = blog_post::Entity::find();
        if !include_hidden {
            q = q.filter(blog_post::Column::IsVisible.eq(true));
        }
        Ok(q.order_by_asc(blog_post::Column::Id).all(&self.db).await?)
    }

    async fn find_post(&self, id: i32) -> Result<Option<Post>, ServiceError> {
        Ok(blog_post::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn load_detail(&self, id: i32) -> Result<Option<PostDetail>, ServiceError> {
        let Some((post, author)) = blog_post::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let tags = tag::list_for_post(&self.db, id).await?.into_iter().map(|t| t.tag).collect();
        let comments = comment::Entity::find()
            .filter(comment::Column::BlogPostId.eq(id))
            .order_by_asc(comment::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|(c, u)| CommentView {
                id: c.id,
                content: c.content,
                comment_date: c.comment_date,
                user_id: c.user_id,
                author_name: u.map(|u| u.display_name).unwrap_or_default(),
            })
            .collect();
        let references = external_reference::list_for_post(&self.db, id).await?;
        let likes = post_like::count_for_post(&self.db, id).await?;
        Ok(Some(PostDetail {
            post,
            author: author.map(|a| AuthorView { id: a.id, display_name: a.display_name }),
            tags,
            comments,
            references,
            likes,
        }))
    }

    async fn insert_comment(&self, post_id: i32, user_id: i32, content: &str) -> Result<(), ServiceError> {
        comment::create(&self.db, post_id, user_id, content).await?;
        Ok(())
    }

    async fn insert_like(&self, post_id: i32, user_id: i32) -> Result<u64, ServiceError> {
        post_like::like(&self.db, user_id, post_id).await?;
        Ok(post_like::count_for_post(&self.db, post_id).await?)
    }

    async fn insert_reference(&self, post_id: i32, description: &str, url: &str) -> Result<Reference, ServiceError> {
        Ok(external_reference::create(&self.db, post_id, description, url).await?)
    }
}
