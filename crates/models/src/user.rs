use sea_orm::{entity::prelude::*, Set, ConnectionTrait};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{blog_post, comment, post_like, user_badge, user_social_media};

/// Discriminator stored in the `type` column of `users`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum AccountKind {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: AccountKind,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    #[sea_orm(unique)]
    pub phone: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub reputation_score: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    BlogPosts,
    Comments,
    PostLikes,
    UserBadges,
    UserSocialMedia,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::BlogPosts => Entity::has_many(blog_post::Entity).into(),
            Relation::Comments => Entity::has_many(comment::Entity).into(),
            Relation::PostLikes => Entity::has_many(post_like::Entity).into(),
            Relation::UserBadges => Entity::has_many(user_badge::Entity).into(),
            Relation::UserSocialMedia => Entity::has_many(user_social_media::Entity).into(),
        }
    }
}

impl Related<blog_post::Entity> for Entity {
    fn to() -> RelationDef { Relation::BlogPosts.def() }
}

impl Related<comment::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for a new `users` row. The id comes from the database.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub kind: AccountKind,
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub email: String,
}

pub fn validate_username(username: &str) -> Result<(), errors::ModelError> {
    if username.trim().is_empty() { return Err(errors::ModelError::Validation("username required".into())); }
    if username.chars().count() > 64 { return Err(errors::ModelError::Validation("username too long (<=64)".into())); }
    if username.chars().any(char::is_whitespace) { return Err(errors::ModelError::Validation("username must not contain spaces".into())); }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    if email.chars().count() > 255 { return Err(errors::ModelError::Validation("email too long (<=255)".into())); }
    Ok(())
}

pub fn validate_display_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("display name required".into())); }
    if name.chars().count() > 128 { return Err(errors::ModelError::Validation("display name too long (<=128)".into())); }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), errors::ModelError> {
    if phone.chars().count() > 32 { return Err(errors::ModelError::Validation("phone too long (<=32)".into())); }
    Ok(())
}

/// Every column check for a new account, in form order.
pub fn validate_profile(username: &str, display_name: &str, email: &str, phone: Option<&str>) -> Result<(), errors::ModelError> {
    validate_username(username)?;
    validate_display_name(display_name)?;
    validate_email(email)?;
    if let Some(p) = phone {
        validate_phone(p)?;
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, new: NewUser) -> Result<Model, errors::ModelError> {
    validate_profile(&new.username, &new.display_name, &new.email, new.phone.as_deref())?;
    let am = ActiveModel {
        kind: Set(new.kind),
        username: Set(new.username),
        password_hash: Set(new.password_hash),
        display_name: Set(new.display_name),
        phone: Set(new.phone),
        email: Set(new.email),
        reputation_score: Set(0),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(errors::ModelError::db)
}

pub async fn add_reputation_score<C: ConnectionTrait>(db: &C, id: i32, delta: i32) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await.map_err(errors::ModelError::db)? else {
        return Ok(None);
    };
    let score = found.reputation_score.saturating_add(delta);
    let mut am: ActiveModel = found.into();
    am.reputation_score = Set(score);
    let updated = am.update(db).await.map_err(errors::ModelError::db)?;
    Ok(Some(updated))
}
