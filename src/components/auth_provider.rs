//! Session store: owns the authoritative `AuthState` for the whole app.
//!
//! LIFECYCLE
//! =========
//! On mount the provider subscribes to the identity client's change events
//! first (so none are missed), then issues the initial session fetch. Both
//! feed the same sequence-guarded `AuthState::apply`, so whichever resolves
//! first settles the loading window and a stale initial fetch can never
//! overwrite a newer event. The subscription is released through
//! `on_cleanup` on every exit path.

use leptos::prelude::*;

use crate::error::ConfigError;
use crate::net::identity::IdentityClient;
use crate::state::auth::AuthState;

#[cfg(feature = "csr")]
use futures::future::{Either, select};

/// How long the initial session fetch may run before the store settles to
/// unauthenticated instead of holding the UI in its loading state.
#[cfg(feature = "csr")]
const INITIAL_FETCH_TIMEOUT_MS: u32 = 8_000;

/// Sequence number reserved for the initial fetch, assigned at issue time
/// so any change event that arrives first takes precedence over it.
#[cfg(feature = "csr")]
const INITIAL_FETCH_SEQ: u64 = 1;

/// Reactive handle to the session store, provided via context.
#[derive(Clone)]
pub struct AuthContext {
    /// The authoritative authentication state. Read-only for consumers;
    /// only the provider's update paths write to it.
    pub state: RwSignal<AuthState>,
    /// The identity client, for invoking auth operations from views.
    pub client: IdentityClient,
}

impl AuthContext {
    /// Ask the identity service to end the session. Local state is not
    /// cleared here; the resulting change event is the single transition
    /// to unauthenticated, so the store never diverges from the client.
    pub fn sign_out(&self) {
        #[cfg(feature = "csr")]
        {
            let client = self.client.clone();
            leptos::task::spawn_local(async move {
                if let Err(e) = client.sign_out().await {
                    leptos::logging::warn!("sign-out failed: {e}");
                }
            });
        }
    }
}

/// Access the session store from a descendant component.
///
/// # Errors
///
/// Returns [`ConfigError::OutsideProvider`] when called outside an
/// [`AuthProvider`] scope.
pub fn try_use_auth() -> Result<AuthContext, ConfigError> {
    use_context::<AuthContext>().ok_or(ConfigError::OutsideProvider)
}

/// Panicking variant of [`try_use_auth`] for component bodies, where a
/// missing provider is a wiring bug.
///
/// # Panics
///
/// Panics when called outside an [`AuthProvider`] scope.
#[must_use]
pub fn use_auth() -> AuthContext {
    match try_use_auth() {
        Ok(ctx) => ctx,
        Err(e) => panic!("{e}"),
    }
}

/// Provides [`AuthContext`] and keeps it synchronized with the identity
/// client. Descendants are withheld until the first update settles so no
/// consumer can observe a transiently-absent user and conclude
/// "unauthenticated".
#[component]
pub fn AuthProvider(client: IdentityClient, children: ChildrenFn) -> impl IntoView {
    let state = RwSignal::new(AuthState::default());
    provide_context(AuthContext {
        state,
        client: client.clone(),
    });

    #[cfg(feature = "csr")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicU64, Ordering};

        // Subscribe before issuing the initial fetch so no event is missed.
        let next_event_seq = Arc::new(AtomicU64::new(INITIAL_FETCH_SEQ + 1));
        let subscription = client.on_auth_state_change(move |session| {
            let seq = next_event_seq.fetch_add(1, Ordering::Relaxed);
            state.update(|s| {
                s.apply(seq, session);
            });
        });
        on_cleanup(move || subscription.unsubscribe());

        leptos::task::spawn_local(async move {
            let fetch = Box::pin(client.initial_session());
            let deadline = Box::pin(gloo_timers::future::TimeoutFuture::new(
                INITIAL_FETCH_TIMEOUT_MS,
            ));
            let session = match select(fetch, deadline).await {
                Either::Left((Ok(session), _)) => session,
                Either::Left((Err(e), _)) => {
                    leptos::logging::error!("initial session fetch failed: {e}");
                    None
                }
                Either::Right(_) => {
                    leptos::logging::warn!(
                        "initial session fetch timed out; treating as signed out"
                    );
                    None
                }
            };
            state.update(|s| {
                s.apply(INITIAL_FETCH_SEQ, session);
            });
        });
    }
    #[cfg(not(feature = "csr"))]
    let _ = client;

    view! {
        <Show when=move || !state.with(AuthState::loading)>
            {children()}
        </Show>
    }
}
