use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::{errors, social_media, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_social_media")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub handle: String,
    pub social_media_id: i32,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { SocialMedia, User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::SocialMedia => Entity::belongs_to(social_media::Entity)
                .from(Column::SocialMediaId)
                .to(social_media::Column::Id)
                .into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl Related<social_media::Entity> for Entity {
    fn to() -> RelationDef { Relation::SocialMedia.def() }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Insert or replace the user's handle on one platform.
pub async fn upsert_handle<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
    social_media_id: i32,
    handle: &str,
) -> Result<Model, errors::ModelError> {
    let handle = handle.trim();
    if handle.is_empty() { return Err(errors::ModelError::Validation("handle required".into())); }
    if let Some(existing) = Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::SocialMediaId.eq(social_media_id))
        .one(db)
        .await
        .map_err(errors::ModelError::db)?
    {
        let mut am: ActiveModel = existing.into();
        am.handle = Set(handle.to_string());
        return am.update(db).await.map_err(errors::ModelError::db);
    }
    let am = ActiveModel {
        handle: Set(handle.to_string()),
        social_media_id: Set(social_media_id),
        user_id: Set(user_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}
