//! Render controller.
//!
//! Turns the current cart into a [`CartSnapshot`] (rows, total, badge, panel
//! state) and renders snapshots to HTML fragments with Askama. The controller
//! holds the last snapshot so the wiring layer can serve it without touching
//! the store.
//!
//! Rows carry line ids, not positions: every quantity and removal affordance
//! dispatches a [`CartAction`] addressed by [`LineItemId`].

use askama::Template;
use askama_web::WebTemplate;
use sidecart_core::{Cart, LineItem, LineItemId, views};

use crate::listing::Catalog;
use crate::widget::CartAction;

/// Inline "No Image" graphic used when no image can be resolved.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%2280%22 height=%2280%22%3E%3Crect width=%2280%22 height=%2280%22 fill=%22%23f0f0f0%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 text-anchor=%22middle%22 dy=%22.3em%22 fill=%22%23999%22%3ENo Image%3C/text%3E%3C/svg%3E";

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    pub id: LineItemId,
    pub name: String,
    /// Unit price with two decimals, no currency symbol.
    pub price: String,
    pub quantity: u32,
    /// Resolved image, or [`PLACEHOLDER_IMAGE`].
    pub image_src: String,
}

impl CartRow {
    fn from_line(line: &LineItem, catalog: &Catalog) -> Self {
        let image_src = if line.image_ref().is_empty() {
            catalog
                .resolve_image(line.name())
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_owned()
        } else {
            line.image_ref().to_owned()
        };

        Self {
            id: line.id(),
            name: line.name().to_owned(),
            price: line.unit_price().display(),
            quantity: line.quantity().get(),
            image_src,
        }
    }

    #[must_use]
    pub fn decrement_quantity(&self) -> i64 {
        i64::from(self.quantity) - 1
    }

    #[must_use]
    pub fn increment_quantity(&self) -> i64 {
        i64::from(self.quantity) + 1
    }

    /// Action behind the `-` button. At quantity 1 this removes the line.
    #[must_use]
    pub fn decrement(&self) -> CartAction {
        CartAction::SetQuantity {
            id: self.id,
            quantity: self.decrement_quantity(),
        }
    }

    /// Action behind the `+` button.
    #[must_use]
    pub fn increment(&self) -> CartAction {
        CartAction::SetQuantity {
            id: self.id,
            quantity: self.increment_quantity(),
        }
    }

    /// Action behind the remove button.
    #[must_use]
    pub const fn remove(&self) -> CartAction {
        CartAction::Remove(self.id)
    }
}

/// Count indicator next to the cart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Badge {
    pub count: u32,
    /// Hidden when the cart is empty.
    pub visible: bool,
}

impl Badge {
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self {
            count,
            visible: count > 0,
        }
    }
}

/// Everything the page shows about the cart after a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSnapshot {
    pub rows: Vec<CartRow>,
    /// Cart total with two decimals, e.g. `"0.00"`.
    pub total: String,
    pub badge: Badge,
    pub panel_open: bool,
}

impl CartSnapshot {
    /// Snapshot of an empty, closed cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total: views::formatted_total(&Cart::new()),
            badge: Badge::default(),
            panel_open: false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Image swapped in when a row's stored image fails to load.
    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        PLACEHOLDER_IMAGE
    }

    /// Row for `id`, if it is still in the cart.
    #[must_use]
    pub fn row(&self, id: LineItemId) -> Option<&CartRow> {
        self.rows.iter().find(|row| row.id == id)
    }
}

impl Default for CartSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Keeps the on-screen cart in step with the store.
#[derive(Debug, Clone, Default)]
pub struct RenderController {
    snapshot: CartSnapshot,
}

impl RenderController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the snapshot from `cart`. Called after every mutation.
    pub fn repaint(&mut self, cart: &Cart, catalog: &Catalog) -> &CartSnapshot {
        let rows = cart
            .iter()
            .map(|line| CartRow::from_line(line, catalog))
            .collect();
        self.snapshot = CartSnapshot {
            rows,
            total: views::formatted_total(cart),
            badge: Badge::new(views::item_count(cart)),
            panel_open: self.snapshot.panel_open,
        };
        tracing::trace!(
            rows = self.snapshot.rows.len(),
            count = self.snapshot.badge.count,
            "Cart repainted"
        );
        &self.snapshot
    }

    /// The last painted snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &CartSnapshot {
        &self.snapshot
    }

    /// Flip the panel between open and closed. Returns the new state.
    pub fn toggle_panel(&mut self) -> bool {
        self.snapshot.panel_open = !self.snapshot.panel_open;
        self.snapshot.panel_open
    }

    pub fn open_panel(&mut self) {
        self.snapshot.panel_open = true;
    }

    pub fn close_panel(&mut self) {
        self.snapshot.panel_open = false;
    }

    #[must_use]
    pub const fn panel_open(&self) -> bool {
        self.snapshot.panel_open
    }

    /// Document scrolling is locked while the panel is open.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.snapshot.panel_open
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart rows, or the empty placeholder.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartSnapshot,
}

/// The whole sidebar: header, rows, total, checkout button.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartSnapshot,
}

/// Cart count badge.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: Badge,
}
