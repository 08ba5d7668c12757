use anyhow::Result;
use clap::Subcommand;
use client::api::cart_api;
use client::ApiClient;

use crate::output::{cart_summary, order_details, Output};

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    Show,
    /// Put a product in the cart
    Add {
        product_id: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i32,
    },
    /// Change the quantity of a cart item
    Update { item_id: i64, quantity: i32 },
    Remove { item_id: i64 },
    Clear,
    ApplyCoupon { code: String },
    RemoveCoupon,
    /// Turn the cart into an order
    Checkout,
}

pub async fn execute(command: CartCommand, api: &ApiClient, output: &Output) -> Result<()> {
    let cart = match command {
        CartCommand::Show => cart_api::get_cart(api).await?,
        CartCommand::Add {
            product_id,
            quantity,
        } => cart_api::add_to_cart(api, product_id, quantity).await?,
        CartCommand::Update { item_id, quantity } => {
            cart_api::update_cart_item(api, item_id, quantity).await?
        }
        CartCommand::Remove { item_id } => cart_api::remove_from_cart(api, item_id).await?,
        CartCommand::Clear => cart_api::clear_cart(api).await?,
        CartCommand::ApplyCoupon { code } => {
            cart_api::apply_coupon(api, &code).await?;
            cart_api::get_cart(api).await?
        }
        CartCommand::RemoveCoupon => {
            cart_api::remove_coupon(api).await?;
            cart_api::get_cart(api).await?
        }
        CartCommand::Checkout => {
            let order = cart_api::checkout(api).await?;
            output.emit(&order, |order| {
                format!("Order placed.\n{}", order_details(order))
            });
            return Ok(());
        }
    };
    output.emit(&cart, cart_summary);
    Ok(())
}
