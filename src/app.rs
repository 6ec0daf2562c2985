//! Root application component with routing and the session store provider.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Route, Router, Routes},
};

use crate::components::auth_provider::AuthProvider;
use crate::components::protected_route::ProtectedRoute;
use crate::config::Config;
use crate::net::identity::IdentityClient;
use crate::pages::{dashboard::DashboardPage, login::LoginPage};

/// Root application component.
///
/// The session store wraps the router, so every route (and the guard)
/// reads one authoritative auth state.
#[component]
pub fn App(config: Config) -> impl IntoView {
    provide_meta_context();

    let client = IdentityClient::new(config);

    view! {
        <Title text="Dashgate"/>

        <AuthProvider client=client>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <ParentRoute path=StaticSegment("") view=ProtectedRoute>
                        <Route path=StaticSegment("") view=DashboardPage/>
                    </ParentRoute>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
