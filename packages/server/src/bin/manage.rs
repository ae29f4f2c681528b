//! Operator CLI for user accounts and roles.
//!
//! Prints one JSON object per invocation so scripts can parse the result.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portal_core::common::auth::policy::{roles_for, POLICY};
use portal_core::common::{PortalError, Role};
use portal_core::config::Config;
use portal_core::domains::accounts::activities::register_member;
use portal_core::domains::accounts::{RegisterMemberForm, User};
use portal_core::kernel::{MediaStore, NotificationHub, ServerDeps};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "portal-manage")]
#[command(about = "Manage portal users and roles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user with a role
    CreateUser {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "member", value_parser = parse_role)]
        role: Role,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        membership_number: Option<String>,
    },

    /// Change an existing user's role
    SetRole {
        username: String,
        #[arg(value_parser = parse_role)]
        role: Role,
    },

    /// Print which roles hold each capability
    Policy,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|e| e.to_string())
}

#[derive(Serialize)]
struct Response {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    policy: Option<Vec<PolicyRow>>,
}

#[derive(Serialize)]
struct PolicyRow {
    capability: String,
    description: &'static str,
    roles: Vec<Role>,
}

fn output(resp: Response) -> Result<()> {
    println!("{}", serde_json::to_string(&resp)?);
    Ok(())
}

fn failure(message: String) -> Result<()> {
    output(Response {
        success: false,
        message: Some(message),
        policy: None,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CreateUser {
            username,
            password,
            role,
            first_name,
            last_name,
            email,
            membership_number,
        } => {
            let form = RegisterMemberForm {
                username,
                password,
                first_name,
                last_name,
                email,
                phone: None,
                membership_number,
                national_id: None,
                role,
            };
            cmd_create_user(form).await
        }
        Commands::SetRole { username, role } => cmd_set_role(&username, role).await,
        Commands::Policy => cmd_policy(),
    }
}

async fn get_pool(config: &Config) -> Result<PgPool> {
    PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

async fn cmd_create_user(form: RegisterMemberForm) -> Result<()> {
    let config = Config::from_env()?;
    let pool = get_pool(&config).await?;
    let deps = ServerDeps::new(
        pool,
        Arc::new(NotificationHub::new()),
        MediaStore::new(config.media_root),
        config.organization_name,
    );

    match register_member(form, &deps).await {
        Ok(user) => output(Response {
            success: true,
            message: Some(format!("Created {} ({})", user.username, user.role)),
            policy: None,
        }),
        Err(e @ (PortalError::Validation { .. } | PortalError::Conflict(_))) => {
            failure(e.to_string())
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_set_role(username: &str, role: Role) -> Result<()> {
    let config = Config::from_env()?;
    let pool = get_pool(&config).await?;

    match User::update_role(username, role, &pool).await? {
        Some(user) => output(Response {
            success: true,
            message: Some(format!("{} is now {}", user.username, user.role)),
            policy: None,
        }),
        None => failure(format!("User '{}' not found", username)),
    }
}

fn cmd_policy() -> Result<()> {
    let rows = POLICY
        .iter()
        .map(|(capability, _)| PolicyRow {
            capability: capability.to_string(),
            description: capability.label(),
            roles: roles_for(*capability).to_vec(),
        })
        .collect();

    output(Response {
        success: true,
        message: None,
        policy: Some(rows),
    })
}
