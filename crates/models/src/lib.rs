//! SeaORM entities for the blog schema, plus small create/validate helpers
//! that the service layer composes.

pub mod errors;
pub mod db;
pub mod user;
pub mod blog_post;
pub mod comment;
pub mod post_like;
pub mod tag;
pub mod external_reference;
pub mod badge;
pub mod user_badge;
pub mod social_media;
pub mod user_social_media;

#[cfg(test)]
mod tests;
