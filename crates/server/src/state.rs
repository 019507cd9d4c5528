use std::sync::Arc;

use sea_orm::DatabaseConnection;

use configs::AppConfig;
use service::account::{repo::SeaOrmAccountRepository, UserService};
use service::blog::{repo::SeaOrmBlogRepository, BlogService};

use crate::session::SessionKeys;
use crate::views::Views;

pub type Users = UserService<SeaOrmAccountRepository>;
pub type Blog = BlogService<SeaOrmBlogRepository>;

/// Shared handles for every request. Services are built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub users: Arc<Users>,
    pub blog: Arc<Blog>,
    pub session: SessionKeys,
    pub base_url: String,
    pub views: Views,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, cfg: &AppConfig) -> Self {
        let users = Arc::new(UserService::new(Arc::new(SeaOrmAccountRepository::new(db.clone()))));
        let blog = Arc::new(BlogService::new(Arc::new(SeaOrmBlogRepository::new(db.clone()))));
        Self {
            db,
            users,
            blog,
            session: SessionKeys::new(&cfg.session),
            base_url: cfg.site.base_url.clone(),
            views: Views::shared(),
        }
    }

    /// Absolute redirect target for a site path such as `/index/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
