use anyhow::Result;
use clap::{Args, Subcommand};
use client::api::profile_api;
use client::ApiClient;
use shared::{AddAddressRequest, AddressType, ChangePasswordRequest, UpdateProfileRequest};

use super::secret;
use crate::output::Output;

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    ChangePassword {
        #[arg(long, env = "STOREFRONT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long, env = "STOREFRONT_NEW_PASSWORD", hide_env_values = true)]
        new: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum AddressCommand {
    Add(AddressArgs),
    Update {
        id: i64,
        #[command(flatten)]
        address: AddressArgs,
    },
    Delete { id: i64 },
    SetDefault { id: i64 },
}

#[derive(Args, Debug)]
pub struct AddressArgs {
    /// shipping, billing or both
    #[arg(long = "type", default_value = "shipping")]
    pub address_type: AddressType,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub default: bool,
}

impl From<AddressArgs> for AddAddressRequest {
    fn from(args: AddressArgs) -> Self {
        AddAddressRequest {
            address_type: args.address_type,
            street: args.street,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
            is_default: args.default,
        }
    }
}

pub async fn execute(command: ProfileCommand, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = profile_api::get_profile(api).await?;
            output.emit(&profile, |profile| {
                serde_json::to_string_pretty(profile).unwrap_or_default()
            });
        }
        ProfileCommand::Update {
            email,
            first_name,
            last_name,
            phone,
        } => {
            let request = UpdateProfileRequest {
                email,
                first_name,
                last_name,
                phone_number: phone,
            };
            if request == UpdateProfileRequest::default() {
                anyhow::bail!("nothing to update, pass at least one field");
            }
            profile_api::update_profile(api, &request).await?;
            output.done("Profile updated.");
        }
        ProfileCommand::ChangePassword { current, new } => {
            let request = ChangePasswordRequest {
                old_password: secret(current, "current password")?,
                new_password: secret(new, "new password")?,
            };
            profile_api::change_password(api, &request).await?;
            output.done("Password changed.");
        }
    }
    Ok(())
}

pub async fn execute_address(
    command: AddressCommand,
    api: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        AddressCommand::Add(args) => {
            profile_api::add_address(api, &args.into()).await?;
            output.done("Address added.");
        }
        AddressCommand::Update { id, address } => {
            profile_api::update_address(api, id, &address.into()).await?;
            output.done(&format!("Address {id} updated."));
        }
        AddressCommand::Delete { id } => {
            profile_api::delete_address(api, id).await?;
            output.done(&format!("Address {id} deleted."));
        }
        AddressCommand::SetDefault { id } => {
            profile_api::set_default_address(api, id).await?;
            output.done(&format!("Address {id} is now the default."));
        }
    }
    Ok(())
}
