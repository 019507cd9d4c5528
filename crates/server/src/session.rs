//! Signed session cookie and the middleware that turns it into a [`Viewer`].
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use configs::SessionConfig;
use service::account::{Account, AdminData, Identity, Role};

use crate::errors::AppError;
use crate::state::ServerState;

pub const SESSION_COOKIE: &str = "blog_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity { id: self.sub, display_name: self.name.clone(), role: self.role }
    }
}

/// HS256 keys plus cookie attributes.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
    secure: bool,
}

impl SessionKeys {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: chrono::Duration::hours(cfg.ttl_hours),
            secure: cfg.secure_cookie,
        }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: identity.id,
            name: identity.display_name.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding, &validation).map(|d| d.claims)
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        let mut cookie = Cookie::new(SESSION_COOKIE, token);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_secure(self.secure);
        cookie.set_same_site(SameSite::Lax);
        cookie
    }

    /// Log `account` in: add a fresh session cookie to `jar`.
    pub fn login(&self, jar: CookieJar, account: &Account) -> Result<CookieJar, AppError> {
        let token = self.issue(&account.identity()).map_err(|e| AppError::Internal(format!("token: {e}")))?;
        Ok(jar.add(self.cookie(token)))
    }
}

/// Cookie that makes the browser drop the session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

/// The caller of the current request, as resolved from the session cookie.
#[derive(Clone, Debug, Default)]
pub struct Viewer(pub Option<Account>);

impl Viewer {
    pub fn account(&self) -> Option<&Account> { self.0.as_ref() }

    pub fn is_admin(&self) -> bool { self.0.as_ref().map(Account::is_admin).unwrap_or(false) }

    /// The logged-in account, or a redirect to the login page.
    pub fn require_login(&self, state: &ServerState) -> Result<&Account, AppError> {
        self.0.as_ref().ok_or_else(|| AppError::LoginRequired(state.url("/login/")))
    }

    /// An admin account; anonymous callers go to login, others get 403.
    pub fn require_admin(&self, state: &ServerState) -> Result<&AdminData, AppError> {
        self.require_login(state)?
            .as_admin()
            .ok_or_else(|| AppError::Forbidden("Only admin can do that".into()))
    }
}

/// Middleware: decode the session cookie, re-load the account and store a
/// [`Viewer`] in request extensions. A cookie that cannot be resolved is
/// cleared and the caller proceeds anonymously.
pub async fn resolve_viewer(State(state): State<ServerState>, jar: CookieJar, mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let mut clear = false;
    let mut viewer = Viewer::default();

    if let Some(token) = jar.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        match state.session.verify(&token) {
            Ok(claims) => match state.users.fetch_user_by_id(claims.sub).await {
                Ok(Some(account)) => viewer = Viewer(Some(account)),
                Ok(None) => {
                    warn!(path = %path, user_id = claims.sub, "session_user_missing");
                    clear = true;
                }
                Err(e) => return AppError::from(e).into_response(),
            },
            Err(e) => {
                debug!(path = %path, err = %e, "session_token_rejected");
                clear = true;
            }
        }
    }

    req.extensions_mut().insert(viewer);
    let resp = next.run(req).await;
    if clear {
        (jar.remove(removal_cookie()), resp).into_response()
    } else {
        resp
    }
}
