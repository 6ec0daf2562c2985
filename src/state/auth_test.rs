use super::*;

fn session(email: &str) -> Session {
    Session {
        access_token: "tok-1".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        refresh_token: Some("refresh-1".to_owned()),
        user: User {
            id: "u-1".to_owned(),
            email: email.to_owned(),
        },
    }
}

// =============================================================
// Defaults and invariants
// =============================================================

#[test]
fn default_is_loading_and_unauthenticated() {
    let state = AuthState::default();
    assert!(state.loading());
    assert!(state.session().is_none());
    assert!(state.user().is_none());
}

#[test]
fn user_present_iff_session_present() {
    let mut state = AuthState::default();
    assert_eq!(state.user().is_some(), state.session().is_some());

    state.apply(1, Some(session("a@b.com")));
    assert_eq!(state.user().is_some(), state.session().is_some());

    state.apply(2, None);
    assert_eq!(state.user().is_some(), state.session().is_some());

    state.apply(3, Some(session("c@d.com")));
    assert_eq!(state.user().is_some(), state.session().is_some());
}

#[test]
fn loading_latches_false() {
    let mut state = AuthState::default();
    state.apply(1, None);
    assert!(!state.loading());

    state.apply(2, Some(session("a@b.com")));
    assert!(!state.loading());

    // A rejected stale update must not disturb the latch either.
    state.apply(1, None);
    assert!(!state.loading());
}

// =============================================================
// Ordering guard
// =============================================================

#[test]
fn stale_update_rejected() {
    let mut state = AuthState::default();
    // Change event (seq 2) lands before the initial fetch (seq 1) resolves.
    assert!(state.apply(2, Some(session("a@b.com"))));
    assert!(!state.apply(1, None));

    assert_eq!(state.user().map(|u| u.email.as_str()), Some("a@b.com"));
}

#[test]
fn equal_sequence_rejected() {
    let mut state = AuthState::default();
    assert!(state.apply(1, Some(session("a@b.com"))));
    assert!(!state.apply(1, None));
    assert!(state.session().is_some());
}

#[test]
fn updates_in_order_applied() {
    let mut state = AuthState::default();
    assert!(state.apply(1, None));
    assert!(state.apply(2, Some(session("a@b.com"))));
    assert!(state.apply(3, None));
    assert!(state.session().is_none());
    assert!(!state.loading());
}

// =============================================================
// Guard decisions
// =============================================================

#[test]
fn guard_checking_while_loading() {
    let state = AuthState::default();
    assert_eq!(state.guard_decision(), GuardDecision::Checking);
}

#[test]
fn guard_redirects_when_settled_without_user() {
    let mut state = AuthState::default();
    state.apply(1, None);
    assert_eq!(state.guard_decision(), GuardDecision::RedirectToLogin);
}

#[test]
fn guard_allows_when_settled_with_user() {
    let mut state = AuthState::default();
    state.apply(1, Some(session("a@b.com")));
    assert_eq!(state.guard_decision(), GuardDecision::Allow);
}

// =============================================================
// Scenarios
// =============================================================

#[test]
fn initial_fetch_without_session_settles_to_redirect() {
    let mut state = AuthState::default();
    assert_eq!(state.guard_decision(), GuardDecision::Checking);

    state.apply(1, None);
    assert!(!state.loading());
    assert!(state.session().is_none());
    assert_eq!(state.guard_decision(), GuardDecision::RedirectToLogin);
}

#[test]
fn later_sign_in_event_exposes_user_email() {
    let mut state = AuthState::default();
    state.apply(1, None);

    state.apply(2, Some(session("a@b.com")));
    assert_eq!(state.guard_decision(), GuardDecision::Allow);
    assert_eq!(state.user().map(|u| u.email.as_str()), Some("a@b.com"));
}

#[test]
fn sign_out_event_returns_to_redirect() {
    let mut state = AuthState::default();
    state.apply(1, Some(session("a@b.com")));
    assert_eq!(state.guard_decision(), GuardDecision::Allow);

    state.apply(2, None);
    assert_eq!(state.guard_decision(), GuardDecision::RedirectToLogin);
    assert!(state.user().is_none());
}

#[test]
fn sign_out_when_already_unauthenticated_changes_nothing() {
    let mut state = AuthState::default();
    state.apply(1, None);
    let before = state.clone();

    // The identity client emits no event in this case, but even a redundant
    // signed-out event leaves the observable state identical.
    state.apply(2, None);
    assert_eq!(state.session(), before.session());
    assert_eq!(state.guard_decision(), before.guard_decision());
    assert_eq!(state.loading(), before.loading());
}
