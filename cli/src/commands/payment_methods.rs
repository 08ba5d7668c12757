use anyhow::Result;
use clap::{Args, Subcommand};
use client::api::payment_methods_api;
use client::ApiClient;
use shared::{AddPaymentMethodRequest, CardDetails, PaymentMethodType};

use super::secret;
use crate::output::{payment_method_line, Output};

#[derive(Subcommand, Debug)]
pub enum PaymentMethodsCommand {
    List,
    Show { id: i64 },
    AddCard(CardArgs),
    AddPaypal { email: String },
    Delete { id: i64 },
    SetDefault { id: i64 },
}

#[derive(Args, Debug)]
pub struct CardArgs {
    /// credit or debit
    #[arg(long = "type", default_value = "credit")]
    pub card_type: PaymentMethodType,
    #[arg(long)]
    pub holder: String,
    #[arg(long, env = "STOREFRONT_CARD_NUMBER", hide_env_values = true)]
    pub number: String,
    /// MM
    #[arg(long)]
    pub expiry_month: String,
    /// YYYY
    #[arg(long)]
    pub expiry_year: String,
    #[arg(long, env = "STOREFRONT_CARD_CVV", hide_env_values = true)]
    pub cvv: String,
}

impl CardArgs {
    fn into_request(self) -> Result<AddPaymentMethodRequest> {
        if !self.card_type.is_card() {
            anyhow::bail!("use add-paypal for PayPal accounts");
        }
        let card = CardDetails {
            card_holder_name: self.holder,
            card_number: secret(self.number, "card number")?,
            expiry_month: self.expiry_month,
            expiry_year: self.expiry_year,
            cvv: secret(self.cvv, "cvv")?,
        };
        Ok(AddPaymentMethodRequest::card(self.card_type, card))
    }
}

pub async fn execute(
    command: PaymentMethodsCommand,
    api: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        PaymentMethodsCommand::List => {
            let methods = payment_methods_api::get_payment_methods(api).await?;
            output.list(&methods, "No saved payment methods.", payment_method_line);
        }
        PaymentMethodsCommand::Show { id } => {
            let method = payment_methods_api::get_payment_method(api, id).await?;
            output.emit(&method, payment_method_line);
        }
        PaymentMethodsCommand::AddCard(args) => {
            let request = args.into_request()?;
            payment_methods_api::add_payment_method(api, &request).await?;
            output.done("Card saved.");
        }
        PaymentMethodsCommand::AddPaypal { email } => {
            let request = AddPaymentMethodRequest::pay_pal(email);
            payment_methods_api::add_payment_method(api, &request).await?;
            output.done("PayPal account saved.");
        }
        PaymentMethodsCommand::Delete { id } => {
            payment_methods_api::delete_payment_method(api, id).await?;
            output.done(&format!("Payment method {id} deleted."));
        }
        PaymentMethodsCommand::SetDefault { id } => {
            payment_methods_api::set_default_payment_method(api, id).await?;
            output.done(&format!("Payment method {id} is now the default."));
        }
    }
    Ok(())
}
