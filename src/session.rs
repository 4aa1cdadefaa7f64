//! Cookie-backed request sessions
//!
//! A session is identified by a random id carried in the `sid` cookie and
//! backed by an in-process map. The only field tracked is the signed-in
//! user id. Route handlers own all session mutation; the auth service
//! never sees a session.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sid";

/// Per-session state. Set on signup/signin, cleared on signout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionData {
    pub user_id: Option<Uuid>,
}

/// A request's session, loaded by the extractor and written back with
/// [`SessionStore::save`]
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    pub data: SessionData,
}

impl Session {
    /// A brand-new session with a fresh random id. Not persisted until
    /// saved.
    fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            data: SessionData::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `Set-Cookie` value pinning this session to the client.
    pub fn cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id)
    }
}

/// In-process session storage shared across requests
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, id: Uuid) -> Option<SessionData> {
        self.inner.read().await.get(&id).copied()
    }

    pub async fn save(&self, session: &Session) {
        self.inner.write().await.insert(session.id, session.data);
    }
}

/// Pull a session id out of the `Cookie` header, if one is present.
fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            Uuid::parse_str(value).ok()
        } else {
            None
        }
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for Session
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A missing, unparsable, or unknown session cookie all degrade to a
        // fresh anonymous session rather than an error.
        if let Some(id) = session_id_from_headers(&parts.headers) {
            if let Some(data) = app_state.sessions().load(id).await {
                return Ok(Session { id, data });
            }
        }

        Ok(Session::fresh())
    }
}
