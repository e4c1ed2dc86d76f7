//! User management CLI commands.
//!
//! Superusers can only be created or promoted here; the HTTP API
//! registers members only.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use flashdeck_auth::password::{PasswordHasher, PasswordValidator};
use flashdeck_core::error::AppError;
use flashdeck_database::Stores;
use flashdeck_entity::user::{User, UserRole};
use flashdeck_service::AdminUserService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Username
        username: String,
        /// Email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
        /// Grant superuser privileges
        #[arg(long)]
        superuser: bool,
    },
    /// List all users
    List {
        /// Filter by role
        #[arg(short, long)]
        role: Option<UserRole>,
    },
    /// Grant superuser privileges to an existing user
    Promote {
        /// Username
        username: String,
    },
    /// Delete a user and everything they own
    Delete {
        /// Username
        username: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
    /// Last login
    last_login: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            username: u.username.clone(),
            email: u.email.clone().unwrap_or_default(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_login: u
                .last_login_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let db = super::connect(&config).await?;
    let stores = Stores::postgres(db.pool().clone());
    let admin = AdminUserService::new(
        Arc::clone(&stores.users),
        Arc::new(PasswordHasher::new()),
        Arc::new(PasswordValidator::new(&config.auth)),
    );

    let result = run(&admin, &args.command, format).await;
    db.close().await;
    result
}

async fn run(
    admin: &AdminUserService,
    command: &UserCommand,
    format: OutputFormat,
) -> Result<(), AppError> {
    match command {
        UserCommand::Create {
            username,
            email,
            password,
            superuser,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password()?,
            };
            let role = if *superuser {
                UserRole::Superuser
            } else {
                UserRole::Member
            };

            let user = admin
                .create_user(username, email.clone(), &password, role)
                .await?;

            output::print_success(&format!("User '{}' created", user.username));
            output::print_kv("ID", &user.id.to_string());
            output::print_kv("Role", user.role.as_str());
        }
        UserCommand::List { role } => {
            let users = admin.list_users().await?;
            let rows: Vec<UserRow> = users
                .iter()
                .filter(|u| role.is_none_or(|r| u.role == r))
                .map(UserRow::from)
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Promote { username } => {
            let user = admin.set_role(username, UserRole::Superuser).await?;
            output::print_success(&format!("User '{}' is now a superuser", user.username));
        }
        UserCommand::Delete { username, force } => {
            let prompt = format!("Delete user '{username}' and all of their content?");
            if !*force && !confirm(&prompt)? {
                println!("Cancelled.");
                return Ok(());
            }

            let id = admin.delete_user(username).await?;
            output::print_success(&format!("User '{username}' ({id}) deleted"));
        }
    }

    Ok(())
}

fn prompt_password() -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
