use anyhow::Result;
use clap::Subcommand;
use client::api::wishlist_api;
use client::ApiClient;
use serde_json::Value;

use crate::output::Output;

#[derive(Subcommand, Debug)]
pub enum WishlistCommand {
    Show,
    Add { product_id: i64 },
    Remove { product_id: i64 },
    /// Whether a product is on the wishlist
    Check { product_id: i64 },
    Clear,
    /// Move every wishlist item to the cart
    MoveToCart,
    Count,
}

pub async fn execute(command: WishlistCommand, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        WishlistCommand::Show => {
            let wishlist = wishlist_api::get_wishlist(api).await?;
            output.emit(&wishlist, wishlist_text);
        }
        WishlistCommand::Add { product_id } => {
            wishlist_api::add_to_wishlist(api, product_id).await?;
            output.done(&format!("Product {product_id} added to the wishlist."));
        }
        WishlistCommand::Remove { product_id } => {
            wishlist_api::remove_from_wishlist(api, product_id).await?;
            output.done(&format!("Product {product_id} removed from the wishlist."));
        }
        WishlistCommand::Check { product_id } => {
            let listed = wishlist_api::is_in_wishlist(api, product_id).await?;
            output.emit(&listed, |listed| {
                if *listed {
                    format!("Product {product_id} is on your wishlist.")
                } else {
                    format!("Product {product_id} is not on your wishlist.")
                }
            });
        }
        WishlistCommand::Clear => {
            wishlist_api::clear_wishlist(api).await?;
            output.done("Wishlist cleared.");
        }
        WishlistCommand::MoveToCart => {
            wishlist_api::move_to_cart(api).await?;
            output.done("Wishlist moved to the cart.");
        }
        WishlistCommand::Count => {
            let count = wishlist_api::get_wishlist_count(api).await?;
            output.emit(&count, |count| format!("{count} items"));
        }
    }
    Ok(())
}

// The wishlist payload is loosely typed; print item names when they are there.
fn wishlist_text(wishlist: &Value) -> String {
    let items = wishlist
        .get("items")
        .and_then(Value::as_array)
        .or_else(|| wishlist.as_array());
    match items {
        Some(items) if items.is_empty() => "Your wishlist is empty.".to_owned(),
        Some(items) => items
            .iter()
            .map(|item| {
                let id = item
                    .get("productId")
                    .and_then(Value::as_i64)
                    .map(|id| format!("#{id:<5} "))
                    .unwrap_or_default();
                let name = item
                    .get("productName")
                    .or_else(|| item.get("name"))
                    .and_then(Value::as_str)
                    .unwrap_or("-");
                format!("{id}{name}")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        None => serde_json::to_string_pretty(wishlist).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wishlist_text_lists_items() {
        let wishlist = json!({
            "items": [
                { "productId": 3, "productName": "Dune" },
                { "productId": 4, "productName": "Emma" }
            ]
        });
        assert_eq!(wishlist_text(&wishlist), "#3     Dune\n#4     Emma");
        assert_eq!(wishlist_text(&json!({ "items": [] })), "Your wishlist is empty.");
    }
}
