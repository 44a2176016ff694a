//! Application view routing
//!
//! A finite view state with unguarded transitions, except that the two auth
//! views and the main views are gated on session presence.

use serde::{Deserialize, Serialize};

/// Enumerated application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    SignIn,
    SignUp,
    Home,
    Create,
    History,
    Trash,
    Export,
    Settings,
    Stats,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::SignIn => "SIGN_IN",
            View::SignUp => "SIGN_UP",
            View::Home => "HOME",
            View::Create => "CREATE",
            View::History => "HISTORY",
            View::Trash => "TRASH",
            View::Export => "EXPORT",
            View::Settings => "SETTINGS",
            View::Stats => "STATS",
        }
    }

    /// True for the two pre-authentication views
    pub fn is_auth_view(&self) -> bool {
        matches!(self, View::SignIn | View::SignUp)
    }
}

/// Resolve a navigation request against the session state
///
/// Auth views reached while authenticated redirect to `Home`; main views
/// reached while unauthenticated redirect to `SignIn`. Everything else is
/// unguarded.
pub fn navigate(target: View, authenticated: bool) -> View {
    if authenticated && target.is_auth_view() {
        View::Home
    } else if !authenticated && !target.is_auth_view() {
        View::SignIn
    } else {
        target
    }
}

/// The view shown at startup
pub fn initial_view(authenticated: bool) -> View {
    if authenticated {
        View::Home
    } else {
        View::SignIn
    }
}
