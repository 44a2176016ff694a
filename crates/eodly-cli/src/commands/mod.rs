//! CLI commands module
//!
//! Contains all CLI command implementations.

pub mod auth;
pub mod export;
pub mod helpers;
pub mod profile;
pub mod report;
pub mod stats;
pub mod trash;

use std::sync::Arc;

use eodly_core::{navigate, ReportJournal, StorageArea, UserDirectory, View};

use crate::output::OutputFormat;

/// Shared context for all commands
pub struct Context {
    pub store: Arc<dyn StorageArea>,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Load the user directory and session
    pub fn directory(&self) -> UserDirectory {
        UserDirectory::load(Arc::clone(&self.store))
    }

    /// Load the report journal (expired trash is purged here)
    pub fn journal(&self) -> ReportJournal {
        ReportJournal::load(Arc::clone(&self.store))
    }

    /// Route to a view; commands gated on a session fail here when the
    /// router redirects to sign-in
    pub fn enter(&self, target: View, directory: &UserDirectory) -> anyhow::Result<View> {
        let authenticated = directory.current_user().is_some();
        let resolved = navigate(target, authenticated);
        if resolved == View::SignIn && target != View::SignIn {
            anyhow::bail!("Not signed in. Run `eodly auth sign-in --email <email>` first.");
        }
        Ok(resolved)
    }
}
