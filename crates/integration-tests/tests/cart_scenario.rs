//! End-to-end cart flows through the widget.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use rust_decimal::Decimal;
use sidecart_integration_tests::{cents, test_catalog, test_channel};
use sidecart_storefront::render::PLACEHOLDER_IMAGE;
use sidecart_storefront::storage::MemoryStorage;
use sidecart_storefront::store::CartStore;
use sidecart_storefront::widget::{CartAction, CartWidget};

#[test]
fn test_serum_walkthrough_through_store() {
    let mut store = CartStore::open(MemoryStorage::new());

    store.add_item("Vitamin C Serum", cents(2499), "serum.jpg", 1);
    assert_eq!(store.item_count(), 1);
    assert_eq!(store.total(), Decimal::new(2499, 2));

    store.add_item("Vitamin C Serum", cents(2499), "serum.jpg", 2);
    assert_eq!(store.cart().len(), 1);
    assert_eq!(store.item_count(), 3);
    assert_eq!(store.total(), Decimal::new(7497, 2));

    assert!(store.set_quantity(0, 1));
    assert_eq!(store.total(), Decimal::new(2499, 2));

    assert!(store.remove_item(0));
    assert!(store.cart().is_empty());
    assert_eq!(store.item_count(), 0);
}

#[test]
fn test_serum_walkthrough_through_widget() {
    let catalog = test_catalog();
    let serum = catalog.find("Vitamin C Serum").cloned().unwrap();
    let mut widget = CartWidget::open(MemoryStorage::new(), catalog, test_channel(None).unwrap());
    assert!(!widget.snapshot().badge.visible);

    let snapshot = widget
        .dispatch(CartAction::AddListing {
            listing: serum.clone(),
            quantity: 1,
        })
        .clone();
    assert!(snapshot.panel_open);
    assert_eq!(snapshot.badge.count, 1);
    assert!(snapshot.badge.visible);
    assert_eq!(snapshot.total, "24.99");
    assert_eq!(snapshot.rows[0].image_src, "serum.jpg");

    let snapshot = widget
        .dispatch(CartAction::AddListing {
            listing: serum,
            quantity: 2,
        })
        .clone();
    assert_eq!(snapshot.rows.len(), 1);
    assert_eq!(snapshot.rows[0].quantity, 3);
    assert_eq!(snapshot.total, "74.97");

    let row = snapshot.rows[0].clone();
    widget.dispatch(CartAction::SetQuantity {
        id: row.id,
        quantity: 1,
    });
    assert_eq!(widget.snapshot().total, "24.99");

    let snapshot = widget.dispatch(row.remove()).clone();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.total, "0.00");
    assert_eq!(snapshot.badge.count, 0);
    assert!(!snapshot.badge.visible);
}

#[test]
fn test_decrement_at_one_removes_line() {
    let catalog = test_catalog();
    let serum = catalog.find("Vitamin C Serum").cloned().unwrap();
    let mut widget = CartWidget::open(MemoryStorage::new(), catalog, test_channel(None).unwrap());

    let row = widget
        .dispatch(CartAction::AddListing {
            listing: serum,
            quantity: 1,
        })
        .rows[0]
        .clone();
    let snapshot = widget.dispatch(row.decrement());
    assert!(snapshot.is_empty());
}

#[test]
fn test_quantity_clamped_at_both_ends() {
    let mut store = CartStore::open(MemoryStorage::new());
    store.add_item("Serum", cents(100), "", 150);
    assert_eq!(store.item_count(), 99);

    store.add_item("Serum", cents(100), "", 5);
    assert_eq!(store.item_count(), 99);

    store.add_item("Balm", cents(100), "", -3);
    assert_eq!(store.cart().find_by_name("Balm").unwrap().quantity().get(), 1);
}

#[test]
fn test_listing_defaults_fill_in() {
    let catalog = test_catalog();
    let softgels = catalog.find("Omega-3 Softgels").cloned().unwrap();
    let video = catalog.find("Daily Multivitamin").cloned().unwrap();
    let mut widget = CartWidget::open(MemoryStorage::new(), catalog, test_channel(None).unwrap());

    widget.dispatch(CartAction::AddListing {
        listing: softgels,
        quantity: 1,
    });
    let snapshot = widget
        .dispatch(CartAction::AddListing {
            listing: video,
            quantity: 1,
        })
        .clone();

    // Unpriced listing uses the fallback price; no media means placeholder.
    assert_eq!(snapshot.rows[0].price, "29.99");
    assert_eq!(snapshot.rows[0].image_src, PLACEHOLDER_IMAGE);
    // Video listings store the video source at add time.
    assert_eq!(snapshot.rows[1].image_src, "multi.mp4");
    assert_eq!(snapshot.total, "49.49");
}

#[test]
fn test_panel_toggle_keeps_cart() {
    let mut widget = CartWidget::open(
        MemoryStorage::new(),
        test_catalog(),
        test_channel(None).unwrap(),
    );
    assert!(widget.dispatch(CartAction::TogglePanel).panel_open);
    assert!(widget.scroll_locked());
    assert!(!widget.dispatch(CartAction::TogglePanel).panel_open);
    assert!(!widget.scroll_locked());
    assert!(widget.cart().is_empty());
}
