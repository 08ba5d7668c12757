use shared::{
    AdminReviewQuery, CreateReviewRequest, ModerateReviewRequest, ProductReviews, Review,
    ReviewQuery,
};

use crate::{ApiClient, ApiRequest, Result};

pub async fn get_product_reviews(
    api: &ApiClient,
    product_id: i64,
    query: &ReviewQuery,
) -> Result<Vec<Review>> {
    let response: ProductReviews = api
        .fetch(ApiRequest::get(format!("/products/{product_id}/Reviews")).query(query)?)
        .await?;
    Ok(response.reviews)
}

pub async fn get_review(api: &ApiClient, product_id: i64, review_id: i64) -> Result<Review> {
    api.fetch(ApiRequest::get(format!(
        "/products/{product_id}/Reviews/{review_id}"
    )))
    .await
}

pub async fn get_my_review(api: &ApiClient, product_id: i64) -> Result<Review> {
    api.fetch(ApiRequest::get(format!("/products/{product_id}/my-review")))
        .await
}

pub async fn create_review(
    api: &ApiClient,
    product_id: i64,
    request: &CreateReviewRequest,
) -> Result<Review> {
    api.fetch(ApiRequest::post(format!("/products/{product_id}/Reviews")).json(request)?)
        .await
}

pub async fn delete_review(api: &ApiClient, product_id: i64, review_id: i64) -> Result<()> {
    api.execute(ApiRequest::delete(format!(
        "/products/{product_id}/Reviews/{review_id}"
    )))
    .await
}

pub async fn mark_helpful(api: &ApiClient, review_id: i64) -> Result<()> {
    api.execute(ApiRequest::post(format!("/reviews/{review_id}/helpful")))
        .await
}

/// Hides or unhides a review. Admin only.
pub async fn moderate_review(
    api: &ApiClient,
    product_id: i64,
    review_id: i64,
    is_hidden: bool,
) -> Result<Review> {
    let request = ModerateReviewRequest { is_hidden };
    api.fetch(
        ApiRequest::put(format!(
            "/products/{product_id}/Reviews/{review_id}/moderate"
        ))
        .json(&request)?,
    )
    .await
}

pub async fn get_all_reviews(api: &ApiClient, query: &AdminReviewQuery) -> Result<Vec<Review>> {
    api.fetch(ApiRequest::get("/admin/reviews").query(query)?)
        .await
}
