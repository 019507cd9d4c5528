use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter, PaginatorTrait};
use serde::{Deserialize, Serialize};

use crate::{blog_post, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post_likes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub blog_post_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User, BlogPost }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
            Relation::BlogPost => Entity::belongs_to(blog_post::Entity).from(Column::BlogPostId).to(blog_post::Column::Id).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl Related<blog_post::Entity> for Entity {
    fn to() -> RelationDef { Relation::BlogPost.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Record a like; liking the same post twice keeps a single row.
pub async fn like<C: ConnectionTrait>(db: &C, user_id: i32, blog_post_id: i32) -> Result<(), errors::ModelError> {
    let existing = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::BlogPostId.eq(blog_post_id))
        .one(db)
        .await
        .map_err(errors::ModelError::db)?;
    if existing.is_some() {
        return Ok(());
    }
    let am = ActiveModel { user_id: Set(user_id), blog_post_id: Set(blog_post_id), ..Default::default() };
    match am.insert(db).await.map_err(errors::ModelError::db) {
        Ok(_) | Err(errors::ModelError::UniqueViolation(_)) => Ok(()),
        Err(e) => Err(e),
    }
}

pub async fn count_for_post<C: ConnectionTrait>(db: &C, blog_post_id: i32) -> Result<u64, errors::ModelError> {
    Entity::find()
        .filter(Column::BlogPostId.eq(blog_post_id))
        .count(db)
        .await
        .map_err(errors::ModelError::db)
}
