use anyhow::Result;
use clap::Args;
use client::api::auth_api;
use client::ApiClient;
use shared::{LoginRequest, RegisterRequest};
use tracing::{info, warn};

use super::secret;
use crate::output::{user_details, Output};

#[derive(Args, Debug)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

pub async fn login(args: LoginArgs, api: &ApiClient, output: &Output) -> Result<()> {
    let request = LoginRequest {
        username: args.username,
        password: secret(args.password, "password")?,
    };
    let response = auth_api::login(api, &request).await?;
    if !api.is_authenticated()? {
        anyhow::bail!("the store did not issue a session token");
    }
    info!(user_id = response.user.id, "Signed in");
    output.emit(&response.user, |user| {
        format!("Signed in as {}", user.display_name())
    });
    Ok(())
}

pub async fn logout(api: &ApiClient, output: &Output) -> Result<()> {
    match api.session() {
        Ok(session) if session.logged() => {
            auth_api::logout(api).await?;
            output.done("Signed out.");
        }
        Ok(_) => {
            api.clear_session()?;
            output.done("Not signed in.");
        }
        Err(error) => {
            warn!(%error, "Discarding unreadable saved session");
            api.clear_session()?;
            output.done("Saved session discarded.");
        }
    }
    Ok(())
}

pub async fn register(args: RegisterArgs, api: &ApiClient, output: &Output) -> Result<()> {
    let request = RegisterRequest {
        username: args.username,
        password: secret(args.password, "password")?,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        phone_number: args.phone,
    };
    let response = auth_api::register(api, &request).await?;
    output.emit(&response, |response| {
        format!(
            "Account {} created, sign in with `storefront login`.",
            response.user.username.as_deref().unwrap_or("-")
        )
    });
    Ok(())
}

pub fn whoami(api: &ApiClient, output: &Output) -> Result<()> {
    let signed_in = auth_api::is_authenticated(api)?;
    match auth_api::current_user(api)? {
        Some(user) if signed_in => output.emit(&user, user_details),
        _ => output.done("Not signed in."),
    }
    Ok(())
}
