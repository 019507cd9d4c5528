use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{badge, errors, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_badges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub badge_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Badge, User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Badge => Entity::belongs_to(badge::Entity).from(Column::BadgeId).to(badge::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl Related<badge::Entity> for Entity {
    fn to() -> RelationDef { Relation::Badge.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Link a badge to a user; awarding the same badge again is a no-op.
pub async fn award<C: ConnectionTrait>(db: &C, user_id: i32, badge_id: i32) -> Result<Model, errors::ModelError> {
    if let Some(found) = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::BadgeId.eq(badge_id))
        .one(db)
        .await
        .map_err(errors::ModelError::db)?
    {
        return Ok(found);
    }
    let am = ActiveModel { badge_id: Set(badge_id), user_id: Set(user_id), ..Default::default() };
    am.insert(db).await.map_err(errors::ModelError::db)
}
