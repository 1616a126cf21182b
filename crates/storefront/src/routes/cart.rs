//! Cart route handlers.
//!
//! Cart operations use HTMX: each mutation returns the re-rendered sidebar
//! and fires a `cart-updated` trigger so the badge refreshes itself.
//! Rows are addressed by line id, never by position.

use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sidecart_core::LineItemId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::render::{CartCountTemplate, CartItemsTemplate, CartPanelTemplate, CartSnapshot};
use crate::state::AppState;
use crate::widget::CartAction;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    /// Display name of the listing being added.
    pub name: String,
    /// Raw quantity input; missing or malformed means one.
    pub quantity: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub line_id: LineItemId,
    pub quantity: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub line_id: LineItemId,
}

/// Parse a quantity input the way the number widget reads it: the leading
/// integer, or one if there is none.
#[must_use]
pub fn parse_quantity(raw: Option<&str>) -> i64 {
    let raw = raw.unwrap_or_default().trim();
    let end = raw
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && matches!(c, '-' | '+')))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    raw.get(..end)
        .and_then(|digits| digits.parse::<i64>().ok())
        .unwrap_or(1)
}

fn updated(cart: CartSnapshot) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartPanelTemplate { cart },
    )
        .into_response()
}

/// Cart sidebar fragment.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartPanelTemplate {
    CartPanelTemplate {
        cart: state.widget().await.snapshot().clone(),
    }
}

/// Cart rows fragment.
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> CartItemsTemplate {
    CartItemsTemplate {
        cart: state.widget().await.snapshot().clone(),
    }
}

/// Add a listed product to the cart (HTMX).
///
/// Opens the sidebar and returns it re-rendered.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let listing = state
        .widget()
        .await
        .catalog()
        .find(&form.name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(form.name.clone()))?;
    let quantity = parse_quantity(form.quantity.as_deref());

    let cart = state
        .dispatch(CartAction::AddListing { listing, quantity })
        .await?;
    Ok(updated(cart))
}

/// Update cart line quantity (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let cart = state
        .dispatch(CartAction::SetQuantity {
            id: form.line_id,
            quantity: parse_quantity(form.quantity.as_deref()),
        })
        .await?;
    Ok(updated(cart))
}

/// Remove cart line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let cart = state.dispatch(CartAction::Remove(form.line_id)).await?;
    Ok(updated(cart))
}

/// Open or close the sidebar (HTMX).
#[instrument(skip(state))]
pub async fn toggle(State(state): State<AppState>) -> Result<CartPanelTemplate> {
    let cart = state.dispatch(CartAction::TogglePanel).await?;
    Ok(CartPanelTemplate { cart })
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> CartCountTemplate {
    CartCountTemplate {
        badge: state.widget().await.snapshot().badge,
    }
}

/// Redirect to the messaging hand-off.
///
/// An empty cart answers with the notice instead of redirecting.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Redirect> {
    let link = state.widget().await.checkout()?;
    Ok(Redirect::to(&link.url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some("3")), 3);
        assert_eq!(parse_quantity(Some(" 12 ")), 12);
        assert_eq!(parse_quantity(Some("-5")), -5);
        assert_eq!(parse_quantity(Some("2.7")), 2);
        assert_eq!(parse_quantity(Some("7 units")), 7);
    }

    #[test]
    fn test_parse_quantity_defaults_to_one() {
        assert_eq!(parse_quantity(None), 1);
        assert_eq!(parse_quantity(Some("")), 1);
        assert_eq!(parse_quantity(Some("abc")), 1);
        assert_eq!(parse_quantity(Some("-")), 1);
    }
}
