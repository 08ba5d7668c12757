use anyhow::Result;
use clap::Subcommand;
use client::api::orders_api;
use client::ApiClient;
use shared::{CreateOrderRequest, OrderStatus};

use crate::output::{order_details, order_line, Output};

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    /// Orders of the signed-in user
    Mine,
    /// Every order in the store (admin)
    All,
    Show { id: i64 },
    /// Create an order from the cart
    Create {
        #[arg(long)]
        shipping_address_id: Option<i64>,
    },
    Cancel { id: i64 },
    /// Move an order to another status (admin)
    Status { id: i64, status: OrderStatus },
    /// Delete an order (admin)
    Delete { id: i64 },
    /// Orders waiting for payment
    Pending,
}

pub async fn execute(command: OrdersCommand, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        OrdersCommand::Mine => {
            let orders = orders_api::get_my_orders(api).await?;
            output.list(&orders, "You have no orders yet.", order_line);
        }
        OrdersCommand::All => {
            let orders = orders_api::get_all_orders(api).await?;
            output.list(&orders, "No orders.", order_line);
        }
        OrdersCommand::Show { id } => {
            let order = orders_api::get_order(api, id).await?;
            output.emit(&order, order_details);
        }
        OrdersCommand::Create {
            shipping_address_id,
        } => {
            let request = CreateOrderRequest {
                shipping_address_id,
            };
            let created = orders_api::create_order(api, &request).await?;
            output.emit(&created, |created| {
                match created.get("id").and_then(serde_json::Value::as_i64) {
                    Some(id) => format!("Order #{id} created."),
                    None => "Order created.".to_owned(),
                }
            });
        }
        OrdersCommand::Cancel { id } => {
            orders_api::cancel_order(api, id).await?;
            output.done(&format!("Order #{id} cancelled."));
        }
        OrdersCommand::Status { id, status } => {
            let order = orders_api::update_order_status(api, id, status).await?;
            output.emit(&order, order_line);
        }
        OrdersCommand::Delete { id } => {
            orders_api::delete_order(api, id).await?;
            output.done(&format!("Order #{id} deleted."));
        }
        OrdersCommand::Pending => {
            let pending = orders_api::get_pending_orders(api).await?;
            output.emit(&pending, |pending| {
                serde_json::to_string_pretty(pending).unwrap_or_default()
            });
        }
    }
    Ok(())
}
