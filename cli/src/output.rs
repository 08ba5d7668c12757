use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use shared::{Cart, Order, PaymentMethod, Product, Review, UserInfo};

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Prints `value` as pretty JSON in json mode, otherwise the text rendering.
    pub fn emit<T: Serialize + ?Sized>(&self, value: &T, text: impl FnOnce(&T) -> String) {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_default()
            );
        } else {
            println!("{}", text(value));
        }
    }

    pub fn list<T: Serialize>(&self, items: &[T], empty: &str, line: impl Fn(&T) -> String) {
        self.emit(items, |items| {
            if items.is_empty() {
                empty.to_owned()
            } else {
                items.iter().map(&line).collect::<Vec<_>>().join("\n")
            }
        });
    }

    pub fn done(&self, message: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "ok": true, "message": message }));
        } else {
            println!("{message}");
        }
    }
}

/// Backend timestamps arrive with or without an offset; both print as `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.format("%Y-%m-%d %H:%M").to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(timestamp) => timestamp.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_owned(),
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub fn product_line(product: &Product) -> String {
    let stock = if !product.in_stock() {
        "out of stock".to_owned()
    } else if product.low_stock() {
        format!("only {} left", product.stock_quantity)
    } else {
        "in stock".to_owned()
    };
    format!(
        "#{:<5} {} by {}  ${}  [{}]  ★ {:.1} ({})",
        product.id,
        or_dash(&product.name),
        or_dash(&product.author),
        product.price,
        stock,
        product.average_rating,
        product.review_count,
    )
}

pub fn product_details(product: &Product) -> String {
    let mut lines = vec![product_line(product)];
    lines.push(format!("genre: {}", or_dash(&product.genre)));
    lines.push(format!("isbn: {}", or_dash(&product.isbn)));
    lines.push(format!("format: {}", or_dash(&product.product_type)));
    if let Some(description) = &product.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    lines.join("\n")
}

pub fn cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_owned();
    }
    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "item {:<5} {} x{}  ${} each  ${}",
                item.id,
                or_dash(&item.product_name),
                item.quantity,
                item.unit_price,
                item.total_price,
            )
        })
        .collect();
    lines.push(format!("subtotal: ${}", cart.subtotal));
    if let Some(code) = &cart.applied_coupon_code {
        lines.push(format!("coupon {code}: -${}", cart.discount_amount));
    }
    lines.push(format!(
        "total: ${} ({} items)",
        cart.total_price, cart.total_items
    ));
    lines.join("\n")
}

pub fn order_line(order: &Order) -> String {
    format!(
        "order #{:<6} {}  {}  payment {}  ${}",
        order.id,
        format_timestamp(&order.order_date),
        order.status,
        order.payment_status,
        order.total_price,
    )
}

pub fn order_details(order: &Order) -> String {
    let mut lines = vec![order_line(order)];
    for item in order.items() {
        lines.push(format!(
            "  {} x{}  ${}",
            or_dash(&item.product_name),
            item.quantity,
            item.total_price
        ));
    }
    if let Some(expires_at) = &order.expires_at {
        lines.push(format!("awaiting payment until {}", format_timestamp(expires_at)));
    }
    lines.join("\n")
}

pub fn review_line(review: &Review) -> String {
    let mut flags = Vec::new();
    if review.is_verified_purchase {
        flags.push("verified");
    }
    if review.is_hidden {
        flags.push("hidden");
    }
    format!(
        "#{:<5} {}/5 by {} on {}{}  ({} found helpful)\n      {}",
        review.id,
        review.rating,
        or_dash(&review.user_name),
        format_timestamp(&review.created_at),
        if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        },
        review.helpful_count,
        or_dash(&review.review_text),
    )
}

pub fn payment_method_line(method: &PaymentMethod) -> String {
    let mut line = format!("#{:<5} {}", method.id, method.summary());
    if let (Some(month), Some(year)) = (&method.expiry_month, &method.expiry_year) {
        line.push_str(&format!("  expires {month}/{year}"));
    }
    if method.is_default {
        line.push_str("  (default)");
    }
    line
}

pub fn user_details(user: &UserInfo) -> String {
    format!(
        "{} <{}>\nusername: {}\nrole: {}\nmember since: {}",
        user.display_name(),
        or_dash(&user.email),
        or_dash(&user.username),
        or_dash(&user.role),
        format_timestamp(&user.created_at),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_accepts_backend_variants() {
        assert_eq!(format_timestamp("2024-05-01T10:15:00Z"), "2024-05-01 10:15");
        assert_eq!(
            format_timestamp("2024-05-01T10:15:42.1234567"),
            "2024-05-01 10:15"
        );
        assert_eq!(format_timestamp("2024-05-01T10:15:42"), "2024-05-01 10:15");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_product_line_shows_low_stock() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Dune",
            "author": "Frank Herbert",
            "genre": null,
            "isbn": null,
            "price": 9.99,
            "description": null,
            "type": null,
            "stockQuantity": 2,
            "lowStockThreshold": 5,
            "stockStatus": null,
            "averageRating": 4.25,
            "reviewCount": 8
        }))
        .unwrap();
        let line = product_line(&product);
        assert!(line.contains("Dune by Frank Herbert"));
        assert!(line.contains("$9.99"));
        assert!(line.contains("only 2 left"));
    }
}
