//! Cart store.
//!
//! Owns the canonical [`Cart`] and writes it through to a [`CartStorage`]
//! after every mutation. A failed write is logged and otherwise ignored: the
//! in-memory cart stays correct for the rest of the session and only the
//! next reload loses the change.
//!
//! Every operation is total. Stale indices and ids are ignored, matching a UI
//! that always re-renders from the same state it dispatches against.

use rust_decimal::Decimal;
use sidecart_core::{Cart, LineItem, LineItemId, Price, Quantity, views};

use crate::storage::CartStorage;

/// The single mutator of a cart.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Open the store, loading whatever the slot currently holds.
    pub fn open(storage: S) -> Self {
        let cart = storage.load();
        tracing::debug!(lines = cart.len(), "Cart loaded");
        Self { cart, storage }
    }

    /// Add `quantity` units of a product.
    ///
    /// The requested quantity is clamped into `1..=99`. If a line with the same
    /// name exists its quantity grows, capped at 99; otherwise a new line is
    /// appended. Returns the id of the line holding the product.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        unit_price: Price,
        image_ref: impl Into<String>,
        quantity: i64,
    ) -> LineItemId {
        let line = LineItem::new(name, unit_price, image_ref, Quantity::saturating(quantity));
        let id = self.cart.add(line);
        tracing::debug!(line_id = %id, quantity, "Item added to cart");
        self.persist();
        id
    }

    /// Remove the line at `index`. Out-of-range indices are a no-op.
    pub fn remove_item(&mut self, index: usize) -> bool {
        let removed = self.cart.remove_at(index).is_some();
        self.persist();
        removed
    }

    /// Set the quantity of the line at `index`.
    ///
    /// Values below one remove the line; values above 99 are clamped.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let changed = self.cart.set_quantity_at(index, quantity);
        self.persist();
        changed
    }

    /// Remove the line with the given id.
    pub fn remove_line(&mut self, id: LineItemId) -> bool {
        let removed = self.cart.remove(id).is_some();
        tracing::debug!(line_id = %id, removed, "Remove line");
        self.persist();
        removed
    }

    /// Set the quantity of the line with the given id. See [`CartStore::set_quantity`].
    pub fn set_line_quantity(&mut self, id: LineItemId, quantity: i64) -> bool {
        let changed = self.cart.set_quantity(id, quantity);
        tracing::debug!(line_id = %id, quantity, changed, "Set line quantity");
        self.persist();
        changed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        views::item_count(&self.cart)
    }

    /// Sum of line totals, unrounded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        views::total(&self.cart)
    }

    /// Read-only view of the current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The underlying storage adapter.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) {
        if let Err(e) = self.storage.save(&self.cart) {
            tracing::error!(error = %e, "Failed to persist cart; change will not survive a reload");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2))
    }

    #[test]
    fn test_open_empty_storage() {
        let store = CartStore::open(MemoryStorage::new());
        assert!(store.cart().is_empty());
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_merges_and_clamps() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item("Serum", price(2499), "", 1);
        store.add_item("Serum", price(2499), "", 2);
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.item_count(), 3);

        store.add_item("Serum", price(2499), "", 500);
        assert_eq!(store.item_count(), 99);
    }

    #[test]
    fn test_add_non_positive_quantity_adds_one() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item("Serum", price(2499), "", 0);
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_every_mutation_writes_through() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());

        store.add_item("A", price(1000), "", 1);
        store.add_item("B", price(550), "", 2);
        store.set_quantity(0, 4);
        store.remove_item(1);
        store.remove_item(42);

        assert_eq!(storage.write_count(), 5);
        assert_eq!(storage.load(), *store.cart());
    }

    #[test]
    fn test_set_quantity_zero_and_negative_remove() {
        for quantity in [0, -5] {
            let mut store = CartStore::open(MemoryStorage::new());
            store.add_item("A", price(1000), "", 1);
            store.add_item("B", price(550), "", 2);

            assert!(store.set_quantity(0, quantity));
            assert_eq!(store.cart().len(), 1);
            assert_eq!(store.cart().items()[0].name(), "B");
        }
    }

    #[test]
    fn test_set_quantity_clamps_to_max() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item("A", price(1000), "", 1);
        store.set_quantity(0, 1000);
        assert_eq!(store.item_count(), 99);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut store = CartStore::open(MemoryStorage::new());
        store.add_item("A", price(1000), "", 1);

        assert!(!store.remove_item(3));
        assert!(!store.set_quantity(3, 5));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_id_operations() {
        let mut store = CartStore::open(MemoryStorage::new());
        let a = store.add_item("A", price(1000), "", 1);
        let b = store.add_item("B", price(550), "", 1);

        assert!(store.set_line_quantity(b, 3));
        assert!(store.remove_line(a));
        assert!(!store.remove_line(a));
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.total(), Decimal::new(1650, 2));
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add_item("A", price(1000), "", 1);

        storage.reject_writes(true);
        store.add_item("B", price(550), "", 2);

        assert_eq!(store.item_count(), 3);
        // The slot still holds the last successful write.
        let reloaded = CartStore::open(storage);
        assert_eq!(reloaded.item_count(), 1);
    }

    #[test]
    fn test_reopen_restores_cart() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add_item("A", price(1000), "a.jpg", 2);
        store.add_item("B", price(550), "", 1);

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.cart(), store.cart());
    }

    #[test]
    fn test_clear() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add_item("A", price(1000), "", 2);
        store.clear();
        assert!(store.cart().is_empty());
        assert!(storage.load().is_empty());
    }

    #[test]
    fn test_max_price_line_totals_without_overflow() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        let huge = Price::new(Decimal::from_str_exact("50000000000000000000000000000").unwrap());
        store.add_item("Big", huge, "", 99);
        store.add_item("Bigger", huge, "", 99);

        let expected = Decimal::from(Price::MAX_UNITS) * Decimal::from(198);
        assert_eq!(store.total(), expected);

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.total(), expected);
    }

    enum Op {
        Add(&'static str, i64, i64),
        Set(usize, i64),
        Remove(usize),
        SetLine(usize, i64),
        RemoveLine(usize),
        Clear,
    }

    #[test]
    fn test_operation_sequence_keeps_count_and_slot_in_step() {
        let ops = [
            Op::Add("A", 1000, 1),
            Op::Add("B", 550, 2),
            Op::Add("A", 1000, 3),
            Op::Add("C", 199, 150),
            Op::Set(1, 7),
            Op::Add("C", 199, 5),
            Op::SetLine(0, 0),
            Op::SetLine(0, 4),
            Op::Remove(9),
            Op::Set(9, 2),
            Op::Add("D", 1, -4),
            Op::RemoveLine(1),
            Op::RemoveLine(1),
            Op::Set(0, -1),
            Op::Add("A", 1000, 98),
            Op::Add("A", 1000, 98),
            Op::Clear,
            Op::Add("B", 550, 1),
            Op::Remove(0),
        ];

        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        let mut ids = Vec::new();

        for (step, op) in ops.into_iter().enumerate() {
            match op {
                Op::Add(name, cents, quantity) => {
                    ids.push(store.add_item(name, price(cents), "", quantity));
                }
                Op::Set(index, quantity) => {
                    store.set_quantity(index, quantity);
                }
                Op::Remove(index) => {
                    store.remove_item(index);
                }
                Op::SetLine(n, quantity) => {
                    store.set_line_quantity(ids[n], quantity);
                }
                Op::RemoveLine(n) => {
                    store.remove_line(ids[n]);
                }
                Op::Clear => store.clear(),
            }

            let quantities: Vec<u32> = store
                .cart()
                .iter()
                .map(|line| line.quantity().get())
                .collect();
            assert_eq!(store.item_count(), quantities.iter().sum::<u32>(), "step {step}");
            assert!(quantities.iter().all(|q| (1..=99).contains(q)), "step {step}");
            let mut names: Vec<&str> = store.cart().iter().map(LineItem::name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), store.cart().len(), "step {step}");
            assert_eq!(storage.load(), *store.cart(), "step {step}");
        }

        assert!(store.cart().is_empty());
        assert_eq!(storage.write_count(), 19);
    }
}
