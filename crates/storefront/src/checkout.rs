//! Checkout hand-off to an external messaging endpoint.
//!
//! Checkout does not place an order. It builds a plain-text summary of the
//! cart and a link that opens the messaging endpoint with that summary
//! pre-filled. Delivery is not tracked.

use sidecart_core::{Cart, views};
use thiserror::Error;
use url::Url;

/// Greeting that opens every order message.
pub const MESSAGE_GREETING: &str = "Hello! I would like to purchase:";

/// Checkout failures shown to the shopper.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Your cart is empty!")]
    EmptyCart,
}

/// The messaging endpoint orders are handed to.
#[derive(Debug, Clone)]
pub struct CheckoutChannel {
    endpoint: Url,
    phone: Option<String>,
}

/// A ready-to-open hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    /// Full URL to open in a new browsing context.
    pub url: String,
    /// The plain-text message carried in the URL.
    pub message: String,
}

impl CheckoutChannel {
    #[must_use]
    pub const fn new(endpoint: Url, phone: Option<String>) -> Self {
        Self { endpoint, phone }
    }

    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Build the hand-off link for `cart`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
    pub fn link(&self, cart: &Cart) -> Result<CheckoutLink, CheckoutError> {
        let message = order_message(cart)?;

        let mut url = self.endpoint.as_str().to_owned();
        url.push(if self.endpoint.query().is_some() { '&' } else { '?' });
        if let Some(phone) = &self.phone {
            url.push_str("phone=");
            url.push_str(&urlencoding::encode(phone));
            url.push('&');
        }
        url.push_str("text=");
        url.push_str(&urlencoding::encode(&message));

        tracing::info!(lines = cart.len(), endpoint = %self.endpoint, "Checkout link built");
        Ok(CheckoutLink { url, message })
    }
}

/// Plain-text order summary: one `"<name> (x<quantity>)"` line per item,
/// then a blank line and the total.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn order_summary(cart: &Cart) -> Result<String, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let lines: Vec<String> = cart
        .iter()
        .map(|line| format!("{} (x{})", line.name(), line.quantity()))
        .collect();
    Ok(format!(
        "{}\n\nTotal: ${}",
        lines.join("\n"),
        views::formatted_total(cart)
    ))
}

/// Full message sent to the endpoint: greeting followed by the summary.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if the cart has no lines.
pub fn order_message(cart: &Cart) -> Result<String, CheckoutError> {
    Ok(format!("{MESSAGE_GREETING}\n\n{}", order_summary(cart)?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use sidecart_core::{LineItem, Price, Quantity};

    use super::*;

    fn two_item_cart() -> Cart {
        Cart::from_items([
            LineItem::new("A", Price::new(Decimal::new(1000, 2)), "", Quantity::ONE),
            LineItem::new(
                "B",
                Price::new(Decimal::new(550, 2)),
                "",
                Quantity::saturating(2),
            ),
        ])
    }

    fn channel(endpoint: &str, phone: Option<&str>) -> CheckoutChannel {
        CheckoutChannel::new(Url::parse(endpoint).unwrap(), phone.map(String::from))
    }

    #[test]
    fn test_summary_text() {
        let summary = order_summary(&two_item_cart()).unwrap();
        assert_eq!(summary, "A (x1)\nB (x2)\n\nTotal: $21.00");
    }

    #[test]
    fn test_message_starts_with_greeting() {
        let message = order_message(&two_item_cart()).unwrap();
        assert!(message.starts_with("Hello! I would like to purchase:\n\nA (x1)"));
        assert!(message.ends_with("Total: $21.00"));
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let channel = channel("https://api.whatsapp.com/send", None);
        assert_eq!(channel.link(&Cart::new()), Err(CheckoutError::EmptyCart));
        assert_eq!(CheckoutError::EmptyCart.to_string(), "Your cart is empty!");
    }

    #[test]
    fn test_link_encodes_message() {
        let channel = channel("https://api.whatsapp.com/send", Some("15550100"));
        let link = channel.link(&two_item_cart()).unwrap();

        assert!(link.url.starts_with("https://api.whatsapp.com/send?phone=15550100&text="));
        assert!(!link.url.contains(' '));
        assert!(!link.url.contains('\n'));

        let encoded = link.url.split("text=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), link.message);
    }

    #[test]
    fn test_link_without_phone() {
        let channel = channel("https://chat.example.com/send", None);
        let link = channel.link(&two_item_cart()).unwrap();
        assert!(link.url.starts_with("https://chat.example.com/send?text="));
    }

    #[test]
    fn test_link_appends_to_existing_query() {
        let channel = channel("https://chat.example.com/send?lang=en", None);
        let link = channel.link(&two_item_cart()).unwrap();
        assert!(link.url.starts_with("https://chat.example.com/send?lang=en&text="));
    }
}
