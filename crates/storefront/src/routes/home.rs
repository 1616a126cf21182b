//! Home page route handler.
//!
//! Shows the catalog as product cards next to the cart sidebar. The page is
//! the collaborator the cart reads listing data from.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::listing::{Media, ProductListing};
use crate::render::{Badge, CartSnapshot};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCard {
    pub name: String,
    pub price: String,
    pub image_src: Option<String>,
    pub video_src: Option<String>,
    pub video_poster: Option<String>,
}

impl ProductCard {
    fn from_listing(listing: &ProductListing, fallback: sidecart_core::Price) -> Self {
        let (image_src, video_src, video_poster) = match &listing.media {
            Media::Image { src } => (Some(src.clone()), None, None),
            Media::Video { src, poster } => (None, src.clone(), poster.clone()),
            Media::None => (None, None, None),
        };
        Self {
            name: listing.display_name().to_owned(),
            price: listing.price_or(fallback).display(),
            image_src,
            video_src,
            video_poster,
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub products: Vec<ProductCard>,
    pub cart: CartSnapshot,
    pub badge: Badge,
}

/// Display home page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> IndexTemplate {
    let widget = state.widget().await;
    let catalog = widget.catalog();
    let products = catalog
        .listings()
        .iter()
        .map(|listing| ProductCard::from_listing(listing, catalog.fallback_price()))
        .collect();
    let cart = widget.snapshot().clone();

    IndexTemplate {
        products,
        badge: cart.badge,
        cart,
    }
}
