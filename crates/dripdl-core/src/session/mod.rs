//! Authenticated session with the service.
//!
//! [`SessionClient`] owns the transport, the credentials and the current
//! [`Session`]. It is the only place where the session is created or replaced:
//! once by [`SessionClient::login`] and again on every
//! [`SessionClient::reauthenticate`], which the fetch pipeline calls when a
//! download fails mid-run (usually an expired session).

mod credentials;

pub use credentials::Credentials;

use crate::model::User;
use crate::transport::{
    cookie_from_set_cookie, Response, ResponseHead, Transport, TransportError,
};
use std::io::Write;

/// Login endpoint (JSON credentials in, JSON user out).
pub const LOGIN_PATH: &str = "/api/users/login";

/// Login failed; no useful work is possible without a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("login rejected with HTTP {status}")]
    Rejected { status: u32 },
    #[error("login request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("login response is not a valid user: {0}")]
    InvalidUser(#[source] serde_json::Error),
    #[error("could not encode credentials: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Cookie token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub cookie: Option<String>,
    pub user: User,
}

pub struct SessionClient<T> {
    transport: T,
    credentials: Credentials,
    session: Session,
}

impl<T: Transport> SessionClient<T> {
    /// Logs in and returns a client holding the new session.
    pub fn login(mut transport: T, credentials: Credentials) -> Result<Self, AuthError> {
        let session = send_login(&mut transport, &credentials)?;
        tracing::info!(user_id = session.user.id, "logged in");
        Ok(Self {
            transport,
            credentials,
            session,
        })
    }

    /// Repeats the login with the stored credentials and replaces the session.
    ///
    /// On failure the previous session is left untouched.
    pub fn reauthenticate(&mut self) -> Result<&Session, AuthError> {
        let session = send_login(&mut self.transport, &self.credentials)?;
        tracing::debug!(user_id = session.user.id, "session re-established");
        self.session = session;
        Ok(&self.session)
    }

    pub fn get(&mut self, path: &str) -> Result<Response, TransportError> {
        let headers = self.auth_headers();
        self.transport.get(path, &headers)
    }

    pub fn post(&mut self, path: &str, body: &[u8]) -> Result<Response, TransportError> {
        let mut headers = self.auth_headers();
        headers.push(("Content-Type".into(), "application/json".into()));
        self.transport.post(path, body, &headers)
    }

    /// Authenticated GET streamed into `sink` (see [`Transport::get_to`]).
    pub fn download(
        &mut self,
        path: &str,
        sink: &mut dyn Write,
    ) -> Result<ResponseHead, TransportError> {
        let headers = self.auth_headers();
        self.transport.get_to(path, &headers, sink)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> &User {
        &self.session.user
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        match &self.session.cookie {
            Some(cookie) => vec![("Cookie".into(), cookie.clone())],
            None => Vec::new(),
        }
    }
}

fn send_login<T: Transport>(
    transport: &mut T,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let body = serde_json::to_vec(credentials).map_err(AuthError::Encode)?;
    let headers = [
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ];
    let response = transport.post(LOGIN_PATH, &body, &headers)?;
    if response.head.is_error() {
        return Err(AuthError::Rejected {
            status: response.status(),
        });
    }

    let cookie = cookie_from_set_cookie(response.head.header_values("set-cookie"));
    if cookie.is_none() {
        tracing::warn!("login response carried no session cookie");
    }
    let user: User = serde_json::from_slice(&response.body).map_err(AuthError::InvalidUser)?;
    Ok(Session { cookie, user })
}
