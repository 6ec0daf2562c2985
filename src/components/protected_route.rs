//! Route guard for the protected region of the app.
//!
//! The decision itself lives in `AuthState::guard_decision` and is pure;
//! this component only executes it: loading indicator while checking, a
//! history-replacing redirect to `/login` when unauthenticated, or the
//! nested routes untouched when authenticated.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::components::auth_provider::use_auth;
use crate::state::auth::GuardDecision;

/// Layout route wrapping everything that requires authentication.
#[component]
pub fn ProtectedRoute() -> impl IntoView {
    let state = use_auth().state;
    let decision = move || state.with(|s| s.guard_decision());

    // `replace` keeps the guarded route out of the history stack, so the
    // browser back button cannot land on a view the user may no longer see.
    let navigate = use_navigate();
    Effect::new(move || {
        if decision() == GuardDecision::RedirectToLogin {
            navigate(
                "/login",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    move || match decision() {
        GuardDecision::Checking => view! {
            <div class="guard-checking">
                <p>"Verifying your session..."</p>
            </div>
        }
        .into_any(),
        // Redirect is in flight; render nothing in the meantime.
        GuardDecision::RedirectToLogin => ().into_any(),
        GuardDecision::Allow => view! { <Outlet/> }.into_any(),
    }
}
