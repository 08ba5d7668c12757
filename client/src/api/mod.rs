pub mod auth_api;
pub mod cart_api;
pub mod orders_api;
pub mod payment_methods_api;
pub mod products_api;
pub mod profile_api;
pub mod reviews_api;
pub mod wishlist_api;
