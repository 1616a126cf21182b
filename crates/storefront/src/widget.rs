//! Cart widget: the dispatch layer between the page and the cart.
//!
//! The page never touches the store directly. It sends a [`CartAction`]; the
//! widget applies it to the [`CartStore`] (which writes through to storage),
//! then repaints through the [`RenderController`] and hands back the fresh
//! [`CartSnapshot`].

use rust_decimal::Decimal;
use sidecart_core::{Cart, LineItemId, Price};

use crate::checkout::{CheckoutChannel, CheckoutError, CheckoutLink};
use crate::listing::{Catalog, ProductListing};
use crate::render::{CartSnapshot, RenderController};
use crate::storage::CartStorage;
use crate::store::CartStore;

/// A request from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add a product with explicit details.
    Add {
        name: String,
        unit_price: Price,
        image_ref: String,
        quantity: i64,
    },
    /// Add the product shown by a listing, defaulting missing details.
    AddListing {
        listing: ProductListing,
        quantity: i64,
    },
    /// Remove a line.
    Remove(LineItemId),
    /// Set a line's quantity; below one removes it.
    SetQuantity { id: LineItemId, quantity: i64 },
    TogglePanel,
    OpenPanel,
    ClosePanel,
}

/// Cart store, render controller and page listings wired together.
#[derive(Debug)]
pub struct CartWidget<S> {
    store: CartStore<S>,
    renderer: RenderController,
    catalog: Catalog,
    checkout: CheckoutChannel,
}

impl<S: CartStorage> CartWidget<S> {
    /// Load the cart from `storage` and paint it once.
    pub fn open(storage: S, catalog: Catalog, checkout: CheckoutChannel) -> Self {
        let store = CartStore::open(storage);
        let mut renderer = RenderController::new();
        renderer.repaint(store.cart(), &catalog);
        Self {
            store,
            renderer,
            catalog,
            checkout,
        }
    }

    /// Apply an action and return the repainted snapshot.
    pub fn dispatch(&mut self, action: CartAction) -> &CartSnapshot {
        tracing::debug!(?action, "Cart action");
        match action {
            CartAction::Add {
                name,
                unit_price,
                image_ref,
                quantity,
            } => {
                self.store.add_item(name, unit_price, image_ref, quantity);
                self.renderer.open_panel();
            }
            CartAction::AddListing { listing, quantity } => {
                let price = listing.price_or(self.catalog.fallback_price());
                let image = listing.media.add_time_ref().unwrap_or_default().to_owned();
                self.store
                    .add_item(listing.display_name(), price, image, quantity);
                self.renderer.open_panel();
            }
            CartAction::Remove(id) => {
                self.store.remove_line(id);
            }
            CartAction::SetQuantity { id, quantity } => {
                self.store.set_line_quantity(id, quantity);
            }
            CartAction::TogglePanel => {
                self.renderer.toggle_panel();
                return self.renderer.snapshot();
            }
            CartAction::OpenPanel => {
                self.renderer.open_panel();
                return self.renderer.snapshot();
            }
            CartAction::ClosePanel => {
                self.renderer.close_panel();
                return self.renderer.snapshot();
            }
        }
        self.renderer.repaint(self.store.cart(), &self.catalog)
    }

    /// Build the checkout hand-off for the current cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to order; the
    /// cart is left untouched either way.
    pub fn checkout(&self) -> Result<CheckoutLink, CheckoutError> {
        self.checkout.link(self.store.cart())
    }

    /// The last painted snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &CartSnapshot {
        self.renderer.snapshot()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        self.store.cart()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.store.item_count()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.store.total()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.renderer.scroll_locked()
    }
}
