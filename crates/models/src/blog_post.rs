use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{comment, errors, external_reference, post_like, tag, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub post_date: DateTimeWithTimeZone,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub is_visible: bool,
    pub author_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Author,
    Comments,
    Tags,
    PostLikes,
    ExternalReferences,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Author => Entity::belongs_to(user::Entity)
                .from(Column::AuthorId)
                .to(user::Column::Id)
                .into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::Tags => Entity::has_many(tag::Entity).into(),
            Relation::PostLikes => Entity::has_many(post_like::Entity).into(),
            Relation::ExternalReferences => Entity::has_many(external_reference::Entity).into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tags.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() { return Err(errors::ModelError::Validation("title required".into())); }
    if title.chars().count() > 255 { return Err(errors::ModelError::Validation("title too long (<=255)".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    author_id: i32,
    title: &str,
    content: &str,
    is_visible: bool,
) -> Result<Model, errors::ModelError> {
    validate_title(title)?;
    let am = ActiveModel {
        post_date: Set(Utc::now().into()),
        title: Set(title.trim().to_string()),
        content: Set(content.to_string()),
        is_visible: Set(is_visible),
        author_id: Set(author_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}
