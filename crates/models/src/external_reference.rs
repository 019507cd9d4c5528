use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{blog_post, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "external_references")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub url: String,
    pub blog_post_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { BlogPost }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::BlogPost => Entity::belongs_to(blog_post::Entity).from(Column::BlogPostId).to(blog_post::Column::Id).into(),
        }
    }
}

impl Related<blog_post::Entity> for Entity {
    fn to() -> RelationDef { Relation::BlogPost.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_url(u: &str) -> Result<(), errors::ModelError> {
    if !(u.starts_with("http://") || u.starts_with("https://")) {
        return Err(errors::ModelError::Validation("url must start with http(s)".into()));
    }
    if u.chars().count() > 1024 {
        return Err(errors::ModelError::Validation("url too long (<=1024)".into()));
    }
    Ok(())
}

/// The label stored for a reference. A blank description falls back to the
/// URL, cut to the column width.
pub fn description_for(description: &str, url: &str) -> Result<String, errors::ModelError> {
    let description = description.trim();
    if description.is_empty() {
        return Ok(url.chars().take(255).collect());
    }
    if description.chars().count() > 255 {
        return Err(errors::ModelError::Validation("description too long (<=255)".into()));
    }
    Ok(description.to_string())
}

pub async fn create<C: ConnectionTrait>(db: &C, blog_post_id: i32, description: &str, url: &str) -> Result<Model, errors::ModelError> {
    let url = url.trim();
    validate_url(url)?;
    let description = description_for(description, url)?;
    let am = ActiveModel {
        description: Set(description),
        url: Set(url.to_string()),
        blog_post_id: Set(blog_post_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}

pub async fn list_for_post<C: ConnectionTrait>(db: &C, blog_post_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::BlogPostId.eq(blog_post_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(errors::ModelError::db)
}
