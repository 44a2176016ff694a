//! Profile and preference commands

use anyhow::{bail, Context as _, Result};
use clap::Subcommand;

use eodly_core::{set_theme, theme, Theme, View, MBTI_TYPES};

use super::auth::UserRow;
use crate::commands::Context;
use crate::output::{print_info, print_single, print_success};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show your profile and preferences
    Show,

    /// Update profile fields
    Update {
        /// New display name
        #[arg(short, long)]
        name: Option<String>,

        /// New email address
        #[arg(short, long)]
        email: Option<String>,

        /// New role
        #[arg(short, long)]
        role: Option<String>,

        /// New MBTI type, e.g. ENTP
        #[arg(short, long)]
        mbti: Option<String>,
    },

    /// Set the theme preference
    Theme {
        /// dark or light
        #[arg(value_parser = ["dark", "light"])]
        theme: String,
    },
}

pub async fn execute(ctx: &Context, action: ProfileAction) -> Result<()> {
    let mut directory = ctx.directory();
    ctx.enter(View::Settings, &directory)?;

    match action {
        ProfileAction::Show => {
            let user = directory
                .current_user()
                .context("Session is missing")?;
            print_single(&UserRow::from(user), ctx.format)?;
            print_info(
                &format!("Theme: {}", theme(ctx.store.as_ref()).as_str()),
                ctx.quiet,
            );
            Ok(())
        }

        ProfileAction::Update {
            name,
            email,
            role,
            mbti,
        } => {
            let mut user = directory
                .current_user()
                .cloned()
                .context("Session is missing")?;

            if let Some(name) = name {
                user.name = name;
            }
            if let Some(email) = email {
                user.email = email;
            }
            if let Some(role) = role {
                user.role = role;
            }
            if let Some(code) = mbti {
                if !MBTI_TYPES.contains(&code.as_str()) {
                    bail!("Unknown MBTI type: {}", code);
                }
                user.mbti = Some(code);
            }

            directory.update_profile(user)?;
            print_success("Profile updated!", ctx.quiet);
            Ok(())
        }

        ProfileAction::Theme { theme } => {
            let theme = Theme::from_str(&theme);
            set_theme(ctx.store.as_ref(), theme)?;
            print_success(&format!("Theme set to {}.", theme.as_str()), ctx.quiet);
            Ok(())
        }
    }
}
