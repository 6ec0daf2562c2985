//! Reusable components: the session store provider and the route guard.

pub mod auth_provider;
pub mod protected_route;
