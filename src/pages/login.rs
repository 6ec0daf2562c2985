//! Login page: email/password sign-in and sign-up, plus OAuth.
//!
//! Auth failures here are recoverable: they render inline next to the form
//! and never touch the session state.

use leptos::prelude::*;

#[cfg(feature = "csr")]
use leptos_router::{NavigateOptions, hooks::use_navigate};

use crate::components::auth_provider::use_auth;

/// Public entry point at `/login`.
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);
    let pending = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let navigate = use_navigate();

    // Shared submit path for sign-in and sign-up.
    let submit = {
        #[cfg(feature = "csr")]
        {
            let client = auth.client.clone();
            move |create_account: bool| {
                if pending.get_untracked() {
                    return;
                }
                pending.set(true);
                error.set(None);

                let client = client.clone();
                let navigate = navigate.clone();
                let address = email.get_untracked();
                let secret = password.get_untracked();
                leptos::task::spawn_local(async move {
                    let result = if create_account {
                        client.sign_up(&address, &secret).await
                    } else {
                        client.sign_in_with_password(&address, &secret).await
                    };
                    pending.set(false);
                    match result {
                        Ok(_) => navigate("/", NavigateOptions::default()),
                        Err(e) => error.set(Some(e.to_string())),
                    }
                });
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_create_account: bool| {}
        }
    };
    let submit_signup = submit.clone();

    let on_oauth = {
        #[cfg(feature = "csr")]
        {
            let client = auth.client.clone();
            move |_| {
                if let Err(e) = client.sign_in_with_oauth("github") {
                    error.set(Some(e.to_string()));
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            move |_: leptos::ev::MouseEvent| {}
        }
    };

    #[cfg(not(feature = "csr"))]
    let _ = &auth;

    view! {
        <div class="login-page">
            <h1>"Dashgate"</h1>
            <p class="login-page__tagline">"Sign in to your dashboard"</p>

            <form
                class="login-page__form"
                on:submit=move |ev: leptos::ev::SubmitEvent| {
                    ev.prevent_default();
                    submit(false);
                }
            >
                <label class="login-page__label">
                    "Email"
                    <input
                        class="login-page__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="login-page__label">
                    "Password"
                    <input
                        class="login-page__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>

                {move || {
                    error
                        .get()
                        .map(|message| view! { <p class="login-page__error">{message}</p> })
                }}

                <div class="login-page__actions">
                    <button type="submit" class="btn btn--primary" disabled=move || pending.get()>
                        "Sign in"
                    </button>
                    <button
                        type="button"
                        class="btn"
                        disabled=move || pending.get()
                        on:click=move |_| submit_signup(true)
                    >
                        "Create account"
                    </button>
                </div>
            </form>

            <div class="login-page__divider">"or"</div>
            <button type="button" class="btn login-page__oauth" on:click=on_oauth>
                "Continue with GitHub"
            </button>
        </div>
    }
}
