//! The cart model.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s. Order only controls how
//! the cart is rendered. The product name is the merge key: a cart never holds
//! two lines with the same name.

use rust_decimal::Decimal;

use super::{LineItemId, Price, Quantity};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    unit_price: Price,
    image_ref: String,
    quantity: Quantity,
}

impl LineItem {
    /// Create a line item with a freshly generated id.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        unit_price: Price,
        image_ref: impl Into<String>,
        quantity: Quantity,
    ) -> Self {
        Self::with_id(LineItemId::generate(), name, unit_price, image_ref, quantity)
    }

    /// Create a line item with a known id (used when restoring a saved cart).
    #[must_use]
    pub fn with_id(
        id: LineItemId,
        name: impl Into<String>,
        unit_price: Price,
        image_ref: impl Into<String>,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
            quantity,
        }
    }

    #[must_use]
    pub const fn id(&self) -> LineItemId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Image reference captured when the item was added. May be empty.
    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Unit price times quantity, unrounded. Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price
            .amount()
            .checked_mul(Decimal::from(self.quantity.get()))
            .unwrap_or(Decimal::MAX)
    }
}

/// Ordered collection of line items, at most one per product name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from lines, merging any lines that share a name.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Add a line, merging into an existing line with the same name.
    ///
    /// On merge the existing line keeps its id, price and image; only the
    /// quantity grows, capped at [`Quantity::MAX`]. Returns the id of the line
    /// that now holds the product.
    pub fn add(&mut self, item: LineItem) -> LineItemId {
        if let Some(existing) = self.items.iter_mut().find(|line| line.name == item.name) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return existing.id;
        }
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove the line at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Remove the line with the given id, if present.
    pub fn remove(&mut self, id: LineItemId) -> Option<LineItem> {
        let index = self.index_of(id)?;
        self.remove_at(index)
    }

    /// Set the quantity of the line at `index`.
    ///
    /// A value below one removes the line; values above the maximum are
    /// clamped. Returns `false` if `index` is out of range.
    pub fn set_quantity_at(&mut self, index: usize, quantity: i64) -> bool {
        if quantity < i64::from(Quantity::MIN) {
            return self.remove_at(index).is_some();
        }
        match self.items.get_mut(index) {
            Some(line) => {
                line.quantity = Quantity::saturating(quantity);
                true
            }
            None => false,
        }
    }

    /// Set the quantity of the line with the given id. See [`Cart::set_quantity_at`].
    pub fn set_quantity(&mut self, id: LineItemId, quantity: i64) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.set_quantity_at(index, quantity))
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Position of the line with the given id.
    #[must_use]
    pub fn index_of(&self, id: LineItemId) -> Option<usize> {
        self.items.iter().position(|line| line.id == id)
    }

    /// Line holding the product `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&LineItem> {
        self.items.iter().find(|line| line.name == name)
    }

    /// Lines in cart order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(name: &str, cents: i64, quantity: i64) -> LineItem {
        LineItem::new(
            name,
            Price::new(Decimal::new(cents, 2)),
            "",
            Quantity::saturating(quantity),
        )
    }

    #[test]
    fn test_add_same_name_merges() {
        let mut cart = Cart::new();
        let first = cart.add(item("Serum", 2499, 1));
        let second = cart.add(item("Serum", 2499, 2));

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 3);
    }

    #[test]
    fn test_merge_keeps_original_price_and_image() {
        let mut cart = Cart::new();
        cart.add(LineItem::new(
            "Serum",
            Price::new(Decimal::new(2499, 2)),
            "serum.jpg",
            Quantity::ONE,
        ));
        cart.add(LineItem::new(
            "Serum",
            Price::new(Decimal::new(1, 0)),
            "other.jpg",
            Quantity::ONE,
        ));

        let line = cart.find_by_name("Serum").unwrap();
        assert_eq!(line.unit_price().display(), "24.99");
        assert_eq!(line.image_ref(), "serum.jpg");
    }

    #[test]
    fn test_merge_caps_at_max() {
        let mut cart = Cart::new();
        cart.add(item("Serum", 100, 90));
        cart.add(item("Serum", 100, 20));
        assert_eq!(cart.items()[0].quantity().get(), Quantity::MAX);
    }

    #[test]
    fn test_distinct_names_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(item("B", 100, 1));
        cart.add(item("A", 100, 1));
        let names: Vec<_> = cart.iter().map(LineItem::name).collect();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn test_remove_at_out_of_range_is_noop() {
        let mut cart = Cart::from_items([item("A", 100, 1)]);
        assert!(cart.remove_at(5).is_none());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_below_one_removes() {
        for quantity in [0, -5] {
            let mut cart = Cart::from_items([item("A", 100, 2), item("B", 100, 1)]);
            assert!(cart.set_quantity_at(0, quantity));
            assert_eq!(cart.len(), 1);
            assert_eq!(cart.items()[0].name(), "B");
        }
    }

    #[test]
    fn test_set_quantity_clamps_to_max() {
        let mut cart = Cart::from_items([item("A", 100, 2)]);
        assert!(cart.set_quantity_at(0, 500));
        assert_eq!(cart.items()[0].quantity().get(), 99);
    }

    #[test]
    fn test_set_quantity_by_stale_id_is_noop() {
        let mut cart = Cart::from_items([item("A", 100, 2)]);
        assert!(!cart.set_quantity(LineItemId::generate(), 5));
        assert!(!cart.set_quantity(LineItemId::generate(), 0));
        assert_eq!(cart.items()[0].quantity().get(), 2);
    }

    #[test]
    fn test_line_total_at_max_price() {
        let line = LineItem::new("Big", Price::max(), "", Quantity::saturating(99));
        assert_eq!(line.line_total(), Decimal::from(Price::MAX_UNITS) * Decimal::from(99));
    }

    #[test]
    fn test_remove_by_id() {
        let mut cart = Cart::new();
        let id = cart.add(item("A", 100, 1));
        cart.add(item("B", 100, 1));

        let removed = cart.remove(id).unwrap();
        assert_eq!(removed.name(), "A");
        assert!(cart.remove(id).is_none());
    }

    #[test]
    fn test_from_items_merges_duplicates() {
        let cart = Cart::from_items([item("A", 100, 1), item("A", 100, 4)]);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity().get(), 5);
    }
}
