//! Auth commands
//!
//! Sign in, sign up, sign out, and session inspection. Sign-in performs no
//! credential check beyond directory membership.

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use eodly_core::{User, View};

use crate::commands::Context;
use crate::output::{print_info, print_single, print_success};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Create a user and sign in
    SignUp {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address (the sign-in key, unique)
        #[arg(short, long)]
        email: String,

        /// MBTI personality type, e.g. INTJ
        #[arg(short, long)]
        mbti: Option<String>,
    },

    /// Sign in by email
    SignIn {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Accepted but never verified
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the current session
    SignOut,

    /// Show the signed-in user
    Whoami,
}

/// User row for table display
#[derive(Debug, Serialize, Tabled)]
pub struct UserRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Role")]
    pub role: String,
    #[tabled(rename = "Department")]
    pub department: String,
    #[tabled(rename = "MBTI")]
    pub mbti: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            department: user.department.clone(),
            mbti: user.mbti.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn execute(ctx: &Context, action: AuthAction) -> Result<()> {
    let mut directory = ctx.directory();

    match action {
        AuthAction::SignUp { name, email, mbti } => {
            if ctx.enter(View::SignUp, &directory)? == View::Home {
                print_info("Already signed in. Sign out first to create another user.", ctx.quiet);
                return Ok(());
            }
            let user = directory.sign_up(&name, &email, mbti.as_deref())?;
            print_success(&format!("Welcome, {}!", user.name), ctx.quiet);
            print_single(&UserRow::from(&user), ctx.format)?;
            Ok(())
        }

        AuthAction::SignIn { email, password } => {
            if password.is_some() {
                log::debug!("[auth] Password supplied; not verified");
            }
            if ctx.enter(View::SignIn, &directory)? == View::Home {
                let name = directory
                    .current_user()
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                print_info(&format!("Already signed in as {}.", name), ctx.quiet);
                return Ok(());
            }
            let user = directory.sign_in(&email)?;
            print_success(&format!("Welcome back, {}!", user.name), ctx.quiet);
            Ok(())
        }

        AuthAction::SignOut => {
            directory.sign_out()?;
            print_success("Signed out.", ctx.quiet);
            Ok(())
        }

        AuthAction::Whoami => match directory.current_user() {
            Some(user) => print_single(&UserRow::from(user), ctx.format),
            None => {
                print_info("Not signed in.", ctx.quiet);
                Ok(())
            }
        },
    }
}
