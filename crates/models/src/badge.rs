//! `badge_master`: the reference list of badge kinds that can be awarded.
use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "badge_master")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub badge: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_or_create<C: ConnectionTrait>(db: &C, badge: &str) -> Result<Model, errors::ModelError> {
    let badge = badge.trim();
    if badge.is_empty() { return Err(errors::ModelError::Validation("badge name required".into())); }
    if let Some(found) = Entity::find().filter(Column::Badge.eq(badge)).one(db).await.map_err(errors::ModelError::db)? {
        return Ok(found);
    }
    let am = ActiveModel { badge: Set(badge.to_string()), ..Default::default() };
    am.insert(db).await.map_err(errors::ModelError::db)
}
