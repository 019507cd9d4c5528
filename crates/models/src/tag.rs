use sea_orm::{entity::prelude::*, Set, ConnectionTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{blog_post, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tag: String,
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

/// Trim, drop blanks and de-duplicate while keeping first-seen order.
pub fn normalize(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for t in tags {
        let t = t.trim();
        if t.is_empty() || out.iter().any(|seen| seen == t) {
            continue;
        }
        out.push(t.to_string());
    }
    out
}

/// Make `tags` the complete tag set of a post.
pub async fn replace_for_post<C: ConnectionTrait>(db: &C, blog_post_id: i32, tags: &[String]) -> Result<Vec<Model>, errors::ModelError> {
    Entity::delete_many()
        .filter(Column::BlogPostId.eq(blog_post_id))
        .exec(db)
        .await
        .map_err(errors::ModelError::db)?;
    let mut created = Vec::new();
    for t in normalize(tags) {
        if t.chars().count() > 64 { return Err(errors::ModelError::Validation(format!("tag too long (<=64): {t}"))); }
        let am = ActiveModel { tag: Set(t), blog_post_id: Set(blog_post_id), ..Default::default() };
        created.push(am.insert(db).await.map_err(errors::ModelError::db)?);
    }
    Ok(created)
}

pub async fn list_for_post<C: ConnectionTrait>(db: &C, blog_post_id: i32) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::BlogPostId.eq(blog_post_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(errors::ModelError::db)
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn normalize_trims_and_dedups() {
        let raw = vec![" rust ".to_string(), "".into(), "web".into(), "rust".into(), "  ".into()];
        assert_eq!(normalize(&raw), vec!["rust".to_string(), "web".to_string()]);
    }
}
