//! Dashboard page, reachable only through the route guard.

use leptos::prelude::*;

use crate::components::auth_provider::use_auth;

/// Protected landing page at `/`.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state;
    let email = move || {
        state.with(|s| s.user().map(|u| u.email.clone()).unwrap_or_default())
    };

    // No manual navigation here: the sign-out change event flips the auth
    // state and the route guard performs the redirect.
    let on_sign_out = move |_| auth.sign_out();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Dashboard"</h1>
                <button class="btn" on:click=on_sign_out>
                    "Sign out"
                </button>
            </header>
            <p class="dashboard-page__welcome">
                "Welcome back, " <span class="dashboard-page__email">{email}</span>
            </p>
        </div>
    }
}
