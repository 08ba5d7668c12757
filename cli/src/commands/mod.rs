pub mod auth;
pub mod cart;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod profile;
pub mod reviews;
pub mod wishlist;

use secrecy::SecretString;

/// Passwords come from a flag or the environment; an empty value is rejected.
pub(crate) fn secret(value: String, what: &str) -> anyhow::Result<SecretString> {
    if value.is_empty() {
        anyhow::bail!("{what} must not be empty");
    }
    Ok(SecretString::from(value))
}
