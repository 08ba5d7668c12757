use anyhow::Result;
use clap::Subcommand;
use client::api::reviews_api;
use client::ApiClient;
use shared::{AdminReviewQuery, CreateReviewRequest, ReviewQuery, SortOrder};

use crate::output::{review_line, Output};

#[derive(Subcommand, Debug)]
pub enum ReviewsCommand {
    /// Reviews of a product
    List {
        product_id: i64,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        verified_only: bool,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        sort_order: Option<SortOrder>,
    },
    /// Your review of a product
    Mine { product_id: i64 },
    Add {
        product_id: i64,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long)]
        text: Option<String>,
    },
    Delete { product_id: i64, review_id: i64 },
    /// Vote a review as helpful
    Helpful { review_id: i64 },
    /// Hide or unhide a review (admin)
    Moderate {
        product_id: i64,
        review_id: i64,
        #[arg(long)]
        unhide: bool,
    },
    /// Every review, hidden ones included (admin)
    All {
        #[arg(long)]
        product_id: Option<i64>,
        #[arg(long)]
        visible_only: bool,
    },
}

pub async fn execute(command: ReviewsCommand, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        ReviewsCommand::List {
            product_id,
            rating,
            verified_only,
            sort_by,
            sort_order,
        } => {
            let query = ReviewQuery {
                rating,
                verified_only: verified_only.then_some(true),
                sort_by,
                sort_order,
            };
            let reviews = reviews_api::get_product_reviews(api, product_id, &query).await?;
            output.list(&reviews, "No reviews yet.", review_line);
        }
        ReviewsCommand::Mine { product_id } => {
            let review = reviews_api::get_my_review(api, product_id).await?;
            output.emit(&review, review_line);
        }
        ReviewsCommand::Add {
            product_id,
            rating,
            text,
        } => {
            let request = CreateReviewRequest {
                rating,
                review_text: text,
            };
            let review = reviews_api::create_review(api, product_id, &request).await?;
            output.emit(&review, |review| format!("Review #{} posted.", review.id));
        }
        ReviewsCommand::Delete {
            product_id,
            review_id,
        } => {
            reviews_api::delete_review(api, product_id, review_id).await?;
            output.done(&format!("Review #{review_id} deleted."));
        }
        ReviewsCommand::Helpful { review_id } => {
            reviews_api::mark_helpful(api, review_id).await?;
            output.done("Thanks for the feedback.");
        }
        ReviewsCommand::Moderate {
            product_id,
            review_id,
            unhide,
        } => {
            let review = reviews_api::moderate_review(api, product_id, review_id, !unhide).await?;
            output.emit(&review, review_line);
        }
        ReviewsCommand::All {
            product_id,
            visible_only,
        } => {
            let query = AdminReviewQuery {
                include_hidden: !visible_only,
                product_id,
            };
            let reviews = reviews_api::get_all_reviews(api, &query).await?;
            output.list(&reviews, "No reviews.", review_line);
        }
    }
    Ok(())
}
