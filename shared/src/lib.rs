use std::fmt;

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{Display, EnumString};

/// Raised when the backend sends an integer code that maps to no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} code: {}", self.kind, self.code)
    }
}

impl std::error::Error for UnknownCode {}

// The backend encodes these enums as their integer discriminant.
macro_rules! wire_code {
    ($name:ident { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = UnknownCode;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok($name::$variant),)+
                    _ => Err(UnknownCode {
                        kind: stringify!($name),
                        code,
                    }),
                }
            }
        }
    };
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn expose_optional<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_some(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "asc", ascii_case_insensitive)]
    Asc,
    #[strum(serialize = "desc", ascii_case_insensitive)]
    Desc,
}

// Users and session

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
    pub created_at: String,
}

impl UserInfo {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            _ => self
                .username
                .clone()
                .unwrap_or_else(|| format!("user #{}", self.id)),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role
            .as_deref()
            .is_some_and(|role| role.eq_ignore_ascii_case("admin"))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: Option<String>,
    pub token: Option<String>,
    pub user: UserInfo,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(serialize_with = "expose")]
    pub old_password: SecretString,
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[strum(ascii_case_insensitive)]
pub enum AddressType {
    #[default]
    Shipping = 0,
    Billing = 1,
    Both = 2,
}

wire_code!(AddressType {
    Shipping = 0,
    Billing = 1,
    Both = 2,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAddressRequest {
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

// Products

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    #[serde(default)]
    pub stock_quantity: i32,
    #[serde(default)]
    pub low_stock_threshold: i32,
    pub stock_status: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub review_count: i32,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub fn low_stock(&self) -> bool {
        self.in_stock() && self.stock_quantity <= self.low_stock_threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub author: String,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub stock_quantity: i32,
    pub low_stock_threshold: i32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearchParams {
    pub search_term: Option<String>,
    pub genre: Option<String>,
    pub author: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockChangeRequest {
    pub amount: i32,
}

// Cart

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub items: Option<Vec<CartItem>>,
    pub applied_coupon_code: Option<String>,
    pub subtotal: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub total_items: i32,
    pub last_updated: String,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub author: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// How a coupon's value reduces the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[strum(ascii_case_insensitive)]
pub enum DiscountType {
    Percentage = 0,
    #[strum(to_string = "Fixed Amount", serialize = "fixed")]
    FixedAmount = 1,
}

wire_code!(DiscountType {
    Percentage = 0,
    FixedAmount = 1,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyCouponRequest {
    pub code: String,
}

// Orders

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[strum(ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Pending = 0,
    Processing = 1,
    Shipped = 2,
    Delivered = 3,
    Cancelled = 4,
}

wire_code!(OrderStatus {
    Pending = 0,
    Processing = 1,
    Shipped = 2,
    Delivered = 3,
    Cancelled = 4,
});

impl OrderStatus {
    /// Orders can be cancelled by the customer until they leave the warehouse.
    pub fn cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[strum(ascii_case_insensitive)]
pub enum PaymentStatus {
    #[default]
    Pending = 0,
    Completed = 1,
    Failed = 2,
    Refunded = 3,
    Cancelled = 4,
}

wire_code!(PaymentStatus {
    Pending = 0,
    Completed = 1,
    Failed = 2,
    Refunded = 3,
    Cancelled = 4,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    pub total_price: Decimal,
    pub order_date: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub payment_method_id: Option<i64>,
    pub shipping_address_id: Option<i64>,
    pub expires_at: Option<String>,
}

impl Order {
    pub fn items(&self) -> &[OrderItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub shipping_address_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub user_id: i64,
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

// Reviews

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub rating: u8,
    pub review_text: Option<String>,
    #[serde(default)]
    pub is_verified_purchase: bool,
    #[serde(default)]
    pub helpful_count: i32,
    #[serde(default)]
    pub is_hidden: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductReviews {
    pub product_id: i64,
    pub product_name: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_reviews: i32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQuery {
    pub rating: Option<u8>,
    pub verified_only: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReviewQuery {
    pub include_hidden: bool,
    pub product_id: Option<i64>,
}

impl Default for AdminReviewQuery {
    fn default() -> Self {
        Self {
            include_hidden: true,
            product_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub review_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateReviewRequest {
    pub is_hidden: bool,
}

// Payment methods

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[strum(ascii_case_insensitive)]
pub enum PaymentMethodType {
    #[strum(to_string = "Credit Card", serialize = "credit-card", serialize = "credit")]
    CreditCard = 0,
    #[strum(to_string = "Debit Card", serialize = "debit-card", serialize = "debit")]
    DebitCard = 1,
    #[strum(to_string = "PayPal", serialize = "paypal")]
    PayPal = 2,
}

wire_code!(PaymentMethodType {
    CreditCard = 0,
    DebitCard = 1,
    PayPal = 2,
});

impl PaymentMethodType {
    pub fn is_card(&self) -> bool {
        !matches!(self, PaymentMethodType::PayPal)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub card_holder_name: Option<String>,
    pub card_number_masked: Option<String>,
    pub card_number_last4: Option<String>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub pay_pal_email: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: String,
}

impl PaymentMethod {
    /// One-line description, e.g. `Credit Card ending 4242` or `PayPal (me@example.com)`.
    pub fn summary(&self) -> String {
        match (&self.card_number_last4, &self.pay_pal_email) {
            (Some(last4), _) if self.method_type.is_card() => {
                format!("{} ending {last4}", self.method_type)
            }
            (_, Some(email)) => format!("{} ({email})", self.method_type),
            _ => self.method_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodsResponse {
    #[serde(default)]
    pub value: Vec<PaymentMethod>,
    #[serde(rename = "Count", default)]
    pub count: usize,
}

#[derive(Debug)]
pub struct CardDetails {
    pub card_holder_name: String,
    pub card_number: SecretString,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvv: SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPaymentMethodRequest {
    #[serde(rename = "type")]
    pub method_type: PaymentMethodType,
    pub card_holder_name: Option<String>,
    #[serde(serialize_with = "expose_optional")]
    pub card_number: Option<SecretString>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    #[serde(serialize_with = "expose_optional")]
    pub cvv: Option<SecretString>,
    pub pay_pal_email: Option<String>,
}

impl AddPaymentMethodRequest {
    /// `method_type` should be one of the card variants; PayPal goes through [`Self::pay_pal`].
    pub fn card(method_type: PaymentMethodType, card: CardDetails) -> Self {
        Self {
            method_type,
            card_holder_name: Some(card.card_holder_name),
            card_number: Some(card.card_number),
            expiry_month: Some(card.expiry_month),
            expiry_year: Some(card.expiry_year),
            cvv: Some(card.cvv),
            pay_pal_email: None,
        }
    }

    pub fn pay_pal(email: impl Into<String>) -> Self {
        Self {
            method_type: PaymentMethodType::PayPal,
            card_holder_name: None,
            card_number: None,
            expiry_month: None,
            expiry_year: None,
            cvv: None,
            pay_pal_email: Some(email.into()),
        }
    }
}
