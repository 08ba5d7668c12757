use anyhow::Result;
use clap::{Args, Subcommand};
use client::api::products_api;
use client::ApiClient;
use rust_decimal::Decimal;
use shared::{NewProduct, ProductSearchParams, ProductUpdate, SortOrder};

use crate::output::{product_details, product_line, Output};

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// Search the catalog
    List(SearchArgs),
    Show {
        id: i64,
    },
    /// Check whether a quantity can be ordered
    Availability {
        id: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i32,
    },
    /// Add a product (admin)
    Create(NewProductArgs),
    /// Change product fields (admin)
    Update(UpdateProductArgs),
    /// Remove a product (admin)
    Delete {
        id: i64,
    },
    /// Adjust stock (admin)
    Stock {
        id: i64,
        #[command(subcommand)]
        change: StockChange,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Matches title, author and description
    pub search: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub min_price: Option<Decimal>,
    #[arg(long)]
    pub max_price: Option<Decimal>,
    #[arg(long)]
    pub sort_by: Option<String>,
    #[arg(long)]
    pub sort_order: Option<SortOrder>,
}

impl From<SearchArgs> for ProductSearchParams {
    fn from(args: SearchArgs) -> Self {
        ProductSearchParams {
            search_term: args.search,
            genre: args.genre,
            author: args.author,
            min_price: args.min_price,
            max_price: args.max_price,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        }
    }
}

#[derive(Args, Debug)]
pub struct NewProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub author: String,
    #[arg(long)]
    pub price: Decimal,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type")]
    pub product_type: Option<String>,
    #[arg(long, default_value_t = 0)]
    pub stock: i32,
    #[arg(long, default_value_t = 5)]
    pub low_stock_threshold: i32,
}

#[derive(Args, Debug)]
pub struct UpdateProductArgs {
    pub id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    #[arg(long)]
    pub price: Option<Decimal>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub isbn: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type")]
    pub product_type: Option<String>,
    #[arg(long)]
    pub low_stock_threshold: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum StockChange {
    /// Replace the stock count
    Set { quantity: i32 },
    Increase { amount: i32 },
    Decrease { amount: i32 },
}

pub async fn execute(command: ProductsCommand, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        ProductsCommand::List(args) => {
            let products = products_api::get_products(api, &args.into()).await?;
            output.list(&products, "No products match.", product_line);
        }
        ProductsCommand::Show { id } => {
            let product = products_api::get_product(api, id).await?;
            output.emit(&product, product_details);
        }
        ProductsCommand::Availability { id, quantity } => {
            let available = products_api::check_availability(api, id, quantity).await?;
            output.emit(&available, |available| {
                if *available {
                    format!("{quantity} available")
                } else {
                    format!("{quantity} not available")
                }
            });
        }
        ProductsCommand::Create(args) => {
            let product = NewProduct {
                name: args.name,
                author: args.author,
                genre: args.genre,
                isbn: args.isbn,
                price: args.price,
                description: args.description,
                product_type: args.product_type,
                stock_quantity: args.stock,
                low_stock_threshold: args.low_stock_threshold,
            };
            let product = products_api::create_product(api, &product).await?;
            output.emit(&product, |product| format!("Created {}", product_line(product)));
        }
        ProductsCommand::Update(args) => {
            let update = ProductUpdate {
                name: args.name,
                author: args.author,
                genre: args.genre,
                isbn: args.isbn,
                price: args.price,
                description: args.description,
                product_type: args.product_type,
                low_stock_threshold: args.low_stock_threshold,
            };
            if update == ProductUpdate::default() {
                anyhow::bail!("nothing to update, pass at least one field");
            }
            products_api::update_product(api, args.id, &update).await?;
            output.done(&format!("Product {} updated.", args.id));
        }
        ProductsCommand::Delete { id } => {
            products_api::delete_product(api, id).await?;
            output.done(&format!("Product {id} deleted."));
        }
        ProductsCommand::Stock { id, change } => {
            match change {
                StockChange::Set { quantity } => {
                    products_api::update_stock(api, id, quantity).await?
                }
                StockChange::Increase { amount } => {
                    products_api::increase_stock(api, id, amount).await?
                }
                StockChange::Decrease { amount } => {
                    products_api::decrease_stock(api, id, amount).await?
                }
            }
            output.done(&format!("Stock of product {id} updated."));
        }
    }
    Ok(())
}
