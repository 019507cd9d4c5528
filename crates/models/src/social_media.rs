//! `social_media_master`: the platforms a user may list a handle for.
use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "social_media_master")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_or_create<C: ConnectionTrait>(db: &C, name: &str) -> Result<Model, errors::ModelError> {
    let name = name.trim();
    if name.is_empty() { return Err(errors::ModelError::Validation("platform name required".into())); }
    if let Some(found) = Entity::find().filter(Column::Name.eq(name)).one(db).await.map_err(errors::ModelError::db)? {
        return Ok(found);
    }
    let am = ActiveModel { name: Set(name.to_string()), ..Default::default() };
    am.insert(db).await.map_err(errors::ModelError::db)
}
