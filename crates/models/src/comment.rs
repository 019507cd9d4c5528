use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{blog_post, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub comment_date: DateTimeWithTimeZone,
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

pub async fn create<C: ConnectionTrait>(db: &C, blog_post_id: i32, user_id: i32, content: &str) -> Result<Model, errors::ModelError> {
    if content.trim().is_empty() { return Err(errors::ModelError::Validation("comment required".into())); }
    let am = ActiveModel {
        content: Set(content.trim().to_string()),
        comment_date: Set(Utc::now().into()),
        user_id: Set(user_id),
        blog_post_id: Set(blog_post_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}
