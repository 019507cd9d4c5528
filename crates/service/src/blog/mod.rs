//! Blog module: posts and everything hanging off them (tags, comments,
//! likes, external references).

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{CommentView, Post, PostDetail, PostInput, Reference};
pub use service::BlogService;
