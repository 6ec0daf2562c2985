//! Client for the hosted identity service.
//!
//! ARCHITECTURE
//! ============
//! The service owns everything hard: password verification, token issuance,
//! refresh policy, and the OAuth handshake. This client wraps its REST
//! surface, caches the issued session (persisted to `localStorage` so a
//! reload stays signed in), and broadcasts every session change to
//! subscribers. The session store is driven entirely by those change
//! events; it never mutates the session directly.
//!
//! All HTTP and browser-storage work is gated behind `#[cfg(feature =
//! "csr")]` since it requires a browser environment; the cache and the
//! change-event machinery compile natively so they can be tested.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::config::Config;
use crate::error::AuthError;
use crate::net::types::{Session, User};

#[cfg(feature = "csr")]
const STORAGE_KEY: &str = "dashgate.session";

type ChangeListener = Arc<dyn Fn(Option<Session>) + Send + Sync>;
type ListenerRegistry = Mutex<Vec<(u64, ChangeListener)>>;

/// Handle to a registered change listener. Delivery stops when it is
/// unsubscribed or dropped, so a torn-down owner can never be called back.
pub struct AuthSubscription {
    id: u64,
    listeners: Weak<ListenerRegistry>,
}

impl AuthSubscription {
    /// Stop receiving session change events.
    pub fn unsubscribe(self) {
        // Removal happens in Drop.
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            if let Ok(mut listeners) = listeners.lock() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

/// Cheaply-clonable client for the identity service.
#[derive(Clone)]
pub struct IdentityClient {
    config: Arc<Config>,
    session: Arc<Mutex<Option<Session>>>,
    listeners: Arc<ListenerRegistry>,
    next_listener_id: Arc<AtomicU64>,
}

impl IdentityClient {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(None)),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The cached session, if any.
    #[must_use]
    pub fn get_session(&self) -> Option<Session> {
        self.session.lock().expect("session cache poisoned").clone()
    }

    /// The cached user, derived from the session.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        self.get_session().map(|s| s.user)
    }

    /// Register a listener for session changes. Events fire on sign-in,
    /// sign-up, and sign-out; the initial restore is returned from
    /// [`Self::initial_session`] instead so it is not delivered twice.
    pub fn on_auth_state_change<F>(&self, listener: F) -> AuthSubscription
    where
        F: Fn(Option<Session>) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .expect("listener registry poisoned")
            .push((id, Arc::new(listener)));
        AuthSubscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Resolve the session present at startup: an OAuth redirect fragment
    /// if one is in the address bar, else a persisted session from a
    /// previous visit, else none.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if redirect tokens are present but the user
    /// lookup behind them fails.
    pub async fn initial_session(&self) -> Result<Option<Session>, AuthError> {
        #[cfg(feature = "csr")]
        {
            if let Some(tokens) = take_fragment_tokens() {
                let user = self.fetch_user(&tokens.access_token).await?;
                let session = Session {
                    access_token: tokens.access_token,
                    token_type: tokens.token_type.unwrap_or_else(|| "bearer".to_owned()),
                    expires_in: tokens.expires_in,
                    refresh_token: tokens.refresh_token,
                    user,
                };
                self.store(Some(&session));
                return Ok(Some(session));
            }
            if let Some(session) = load_persisted_session() {
                self.store(Some(&session));
                return Ok(Some(session));
            }
            Ok(None)
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(self.get_session())
        }
    }

    /// Exchange an email/password pair for a session.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] for a rejected pair; other
    /// variants for transport or decoding failures.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.credentials_request("/auth/v1/token?grant_type=password", email, password)
            .await
    }

    /// Register a new account with an email/password pair.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::sign_in_with_password`].
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.credentials_request("/auth/v1/signup", email, password)
            .await
    }

    /// Start a redirect-based OAuth flow. The browser leaves the app; on
    /// return, [`Self::initial_session`] picks the tokens out of the URL
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the navigation cannot be started.
    pub fn sign_in_with_oauth(&self, provider: &str) -> Result<(), AuthError> {
        #[cfg(feature = "csr")]
        {
            let window = web_sys::window()
                .ok_or_else(|| AuthError::Network("no browser window".to_owned()))?;
            let origin = window
                .location()
                .origin()
                .map_err(|_| AuthError::Network("origin unavailable".to_owned()))?;
            let url = format!(
                "{}/auth/v1/authorize?provider={provider}&redirect_to={origin}",
                self.config.service_url
            );
            window
                .location()
                .set_href(&url)
                .map_err(|_| AuthError::Network("navigation failed".to_owned()))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = provider;
            Err(AuthError::Unsupported)
        }
    }

    /// End the current session. A no-op when already signed out; otherwise
    /// the server-side revoke is best-effort and the local session is
    /// cleared (with a change event) regardless of its outcome.
    ///
    /// # Errors
    ///
    /// Currently infallible; the `Result` mirrors the service operation it
    /// wraps.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.get_session() else {
            return Ok(());
        };

        #[cfg(feature = "csr")]
        {
            let url = format!("{}/auth/v1/logout", self.config.service_url);
            let request = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &format!("Bearer {}", session.access_token));
            if let Err(e) = request.send().await {
                leptos::logging::warn!("sign-out revoke failed: {e}");
            }
        }
        #[cfg(not(feature = "csr"))]
        let _ = session;

        self.commit(None);
        Ok(())
    }

    /// POST an email/password body and decode the resulting session.
    #[cfg(feature = "csr")]
    async fn credentials_request(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        #[derive(serde::Serialize)]
        struct Credentials<'a> {
            email: &'a str,
            password: &'a str,
        }

        let url = format!("{}{path}", self.config.service_url);
        let response = gloo_net::http::Request::post(&url)
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .map_err(|e| AuthError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(response.status(), &body));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))?;
        self.commit(Some(session.clone()));
        Ok(session)
    }

    #[cfg(not(feature = "csr"))]
    async fn credentials_request(
        &self,
        _path: &str,
        _email: &str,
        _password: &str,
    ) -> Result<Session, AuthError> {
        Err(AuthError::Unsupported)
    }

    /// Fetch the user record behind an access token.
    #[cfg(feature = "csr")]
    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = format!("{}/auth/v1/user", self.config.service_url);
        let response = gloo_net::http::Request::get(&url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(response.status(), &body));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    /// Cache (and persist) a session without notifying listeners.
    fn store(&self, session: Option<&Session>) {
        *self.session.lock().expect("session cache poisoned") = session.cloned();
        #[cfg(feature = "csr")]
        persist_session(session);
    }

    /// Cache a session and broadcast the change to all listeners.
    fn commit(&self, session: Option<Session>) {
        self.store(session.as_ref());

        // Snapshot the listeners so callbacks run outside the lock and may
        // themselves subscribe or unsubscribe.
        let snapshot: Vec<ChangeListener> = self
            .listeners
            .lock()
            .expect("listener registry poisoned")
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(session.clone());
        }
    }
}

/// Tokens carried back from an OAuth redirect in the URL fragment.
#[cfg_attr(not(any(test, feature = "csr")), allow(dead_code))]
#[derive(Debug, PartialEq, Eq)]
struct FragmentTokens {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<u64>,
    token_type: Option<String>,
}

/// Parse `#access_token=...&refresh_token=...` style fragments. Returns
/// `None` when no access token is present.
#[cfg_attr(not(any(test, feature = "csr")), allow(dead_code))]
fn parse_fragment_tokens(fragment: &str) -> Option<FragmentTokens> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut token_type = None;

    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        match key {
            "access_token" => access_token = Some(value.to_owned()),
            "refresh_token" => refresh_token = Some(value.to_owned()),
            "expires_in" => expires_in = value.parse().ok(),
            "token_type" => token_type = Some(value.to_owned()),
            _ => {}
        }
    }

    Some(FragmentTokens {
        access_token: access_token?,
        refresh_token,
        expires_in,
        token_type,
    })
}

/// Map an error response to an [`AuthError`], digging the human-readable
/// detail out of the JSON bodies the service uses.
#[cfg_attr(not(any(test, feature = "csr")), allow(dead_code))]
fn error_from_response(status: u16, body: &str) -> AuthError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| {
                    value
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned)
                })
        })
        .unwrap_or_else(|| body.trim().to_owned());

    if (status == 400 || status == 401)
        && detail.to_ascii_lowercase().contains("invalid login credentials")
    {
        AuthError::InvalidCredentials
    } else if detail.is_empty() {
        AuthError::Rejected(format!("status {status}"))
    } else {
        AuthError::Rejected(detail)
    }
}

/// Read and clear OAuth tokens from the address bar, if present.
#[cfg(feature = "csr")]
fn take_fragment_tokens() -> Option<FragmentTokens> {
    let window = web_sys::window()?;
    let location = window.location();
    let hash = location.hash().ok()?;
    let tokens = parse_fragment_tokens(&hash)?;

    // Scrub the tokens from the URL so they do not linger in history.
    if let Ok(history) = window.history() {
        let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }

    Some(tokens)
}

#[cfg(feature = "csr")]
fn persist_session(session: Option<&Session>) {
    let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) else {
        return;
    };
    match session {
        Some(session) => {
            if let Ok(json) = serde_json::to_string(session) {
                let _ = storage.set_item(STORAGE_KEY, &json);
            }
        }
        None => {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

#[cfg(feature = "csr")]
fn load_persisted_session() -> Option<Session> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let json = storage.get_item(STORAGE_KEY).ok()??;
    match serde_json::from_str(&json) {
        Ok(session) => Some(session),
        Err(e) => {
            leptos::logging::warn!("stored session unreadable, discarding: {e}");
            let _ = storage.remove_item(STORAGE_KEY);
            None
        }
    }
}
