//! Server-rendered HTML pages. Templates live in `templates/` and are compiled
//! into the binary; minijinja escapes every `{{ }}` in them since the names end
//! in `.html`.
use axum::http::StatusCode;
use axum::response::Html;
use minijinja::{context, Environment};
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::error;

use service::account::Account;
use service::blog::{Post, PostDetail};

use crate::errors::AppError;
use crate::session::Viewer;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("login.html", include_str!("../templates/login.html")),
    ("register.html", include_str!("../templates/register.html")),
    ("post_form.html", include_str!("../templates/post_form.html")),
    ("post_detail.html", include_str!("../templates/post_detail.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("error.html", include_str!("../templates/error.html")),
];

/// Shared view engine.
static SHARED_VIEW_ENGINE: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut view_engine = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = view_engine.add_template(name, source) {
            error!(template = %name, error = %e, "template failed to compile");
        }
    }
    view_engine
});

/// Signed-in user as the navigation bar sees it.
#[derive(Debug, Serialize)]
struct NavUser<'a> {
    id: i32,
    display_name: &'a str,
    is_admin: bool,
}

fn nav(viewer: &Viewer) -> Option<NavUser<'_>> {
    viewer.account().map(|a| NavUser { id: a.id(), display_name: a.display_name(), is_admin: a.is_admin() })
}

#[derive(Debug, Serialize)]
struct Alert<'a> {
    kind: &'static str,
    message: &'a str,
    post_id: Option<i32>,
}

impl<'a> Alert<'a> {
    fn danger(message: &'a str) -> Self { Alert { kind: "danger", message, post_id: None } }
}

#[derive(Debug, Serialize)]
struct PostRow<'a> {
    id: i32,
    title: &'a str,
    date: String,
    is_visible: bool,
}

#[derive(Debug, Serialize)]
struct CommentRow<'a> {
    user_id: i32,
    author: &'a str,
    date: String,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ReferenceRow<'a> {
    url: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct DetailView<'a> {
    id: i32,
    title: &'a str,
    date: String,
    author: Option<&'a str>,
    content: &'a str,
    tags: &'a [String],
    references: Vec<ReferenceRow<'a>>,
    comments: Vec<CommentRow<'a>>,
    likes: u64,
}

#[derive(Debug, Serialize)]
struct ProfileView<'a> {
    display_name: &'a str,
    reputation: i32,
    is_admin: bool,
}

#[derive(Debug, Serialize)]
struct HandleRow<'a> {
    platform: &'a str,
    handle: &'a str,
}

/// Values shown in the add/edit post form. `post_id` is set when editing.
#[derive(Debug, Default, Serialize)]
pub struct PostForm<'a> {
    pub post_id: Option<i32>,
    pub title: &'a str,
    pub content: &'a str,
    pub tags: String,
    pub visible: bool,
}

/// Handle on the shared template environment.
#[derive(Clone, Copy)]
pub struct Views {
    engine: &'static Environment<'static>,
}

impl Default for Views {
    fn default() -> Self { Self::shared() }
}

impl Views {
    pub fn shared() -> Self {
        Self { engine: &*SHARED_VIEW_ENGINE }
    }

    fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<Html<String>, AppError> {
        let template = self.engine.get_template(name)?;
        Ok(Html(template.render(ctx)?))
    }

    pub fn index(&self, viewer: &Viewer, posts: &[Post]) -> Result<Html<String>, AppError> {
        let rows: Vec<PostRow<'_>> = posts
            .iter()
            .map(|p| PostRow {
                id: p.id,
                title: &p.title,
                date: p.post_date.format("%Y-%m-%d").to_string(),
                is_visible: p.is_visible,
            })
            .collect();
        self.render("index.html", context! { title => "Home", viewer => nav(viewer), posts => rows })
    }

    pub fn login_form(&self, viewer: &Viewer, error: Option<&str>) -> Result<Html<String>, AppError> {
        let alert = error.map(Alert::danger);
        self.render("login.html", context! { title => "Login", viewer => nav(viewer), alert })
    }

    pub fn register_form(&self, viewer: &Viewer, error: Option<&str>) -> Result<Html<String>, AppError> {
        let alert = error.map(Alert::danger);
        self.render("register.html", context! { title => "Register", viewer => nav(viewer), alert })
    }

    pub fn post_form(
        &self,
        viewer: &Viewer,
        heading: &str,
        form: &PostForm<'_>,
        saved: Option<&str>,
    ) -> Result<Html<String>, AppError> {
        let alert = saved.map(|message| Alert { kind: "success", message, post_id: form.post_id });
        self.render("post_form.html", context! { title => heading, viewer => nav(viewer), alert, form })
    }

    pub fn post_detail(&self, viewer: &Viewer, detail: &PostDetail) -> Result<Html<String>, AppError> {
        let p = &detail.post;
        let post = DetailView {
            id: p.id,
            title: &p.title,
            date: p.post_date.format("%Y-%m-%d %H:%M").to_string(),
            author: detail.author.as_ref().map(|a| a.display_name.as_str()),
            content: &p.content,
            tags: &detail.tags,
            references: detail
                .references
                .iter()
                .map(|r| ReferenceRow { url: &r.url, description: &r.description })
                .collect(),
            comments: detail
                .comments
                .iter()
                .map(|c| CommentRow {
                    user_id: c.user_id,
                    author: &c.author_name,
                    date: c.comment_date.format("%Y-%m-%d %H:%M").to_string(),
                    content: &c.content,
                })
                .collect(),
            likes: detail.likes,
        };
        let alert = (!p.is_visible).then(|| Alert {
            kind: "warning",
            message: "This post is only visible to admins.",
            post_id: None,
        });
        self.render("post_detail.html", context! { title => &p.title, viewer => nav(viewer), alert, post })
    }

    pub fn profile(
        &self,
        viewer: &Viewer,
        account: &Account,
        badges: &[String],
        handles: &[(String, String)],
    ) -> Result<Html<String>, AppError> {
        let u = account.profile();
        let user = ProfileView { display_name: &u.display_name, reputation: u.reputation_score, is_admin: account.is_admin() };
        let handles: Vec<HandleRow<'_>> =
            handles.iter().map(|(platform, handle)| HandleRow { platform, handle }).collect();
        self.render(
            "profile.html",
            context! { title => &u.display_name, viewer => nav(viewer), user, badges, handles },
        )
    }

    /// Error pages cannot fail; a broken template degrades to plain text.
    pub fn error_page(&self, status: StatusCode, message: &str) -> Html<String> {
        let title = status.canonical_reason().unwrap_or("Error");
        let code = status.as_u16();
        self.render("error.html", context! { title, code, message }).unwrap_or_else(|e| {
            error!(error = %e, "error page failed to render");
            Html(format!("{code} {title}"))
        })
    }
}
