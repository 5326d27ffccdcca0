use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};

use pizzeria_order_cli::api::{OrderTransport, OrderTransportError};
use pizzeria_order_cli::catalog::{CatalogSource, JsonCatalogSource};
use pizzeria_order_cli::models::order::{ContactInfo, OrderPayload};
use pizzeria_order_cli::models::product::Product;
use pizzeria_order_cli::services::{Cart, CartError, ProductConfigurator};
use uuid::Uuid;

/// Transport double that records every submitted payload.
struct RecordingTransport {
    submissions: Arc<Mutex<Vec<OrderPayload>>>,
}

impl RecordingTransport {
    fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn submissions(&self) -> Vec<OrderPayload> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderTransport for RecordingTransport {
    async fn submit(&self, payload: &OrderPayload) -> Result<(), OrderTransportError> {
        self.submissions.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

const TEST_CATALOG: &str = r#"{
    "products": [
        {
            "id": "pizza",
            "name": "Pizza",
            "base_price": 20,
            "params": [
                {
                    "id": "additions",
                    "label": "Additions",
                    "options": {
                        "extra": { "label": "Extra", "price": 5 }
                    }
                }
            ]
        },
        {
            "id": "salad",
            "name": "Salad",
            "base_price": 30,
            "params": [
                {
                    "id": "base",
                    "label": "Base",
                    "options": {
                        "remove-x": { "label": "X", "price": 3, "default": true }
                    }
                }
            ]
        }
    ]
}"#;

async fn load_test_catalog() -> Vec<Arc<Product>> {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp catalog");
    file.write_all(TEST_CATALOG.as_bytes())
        .expect("Failed to write temp catalog");

    let source = JsonCatalogSource::new(file.path());
    source
        .load()
        .await
        .expect("Catalog should load")
        .into_iter()
        .map(Arc::new)
        .collect()
}

fn find<'a>(catalog: &'a [Arc<Product>], id: &str) -> Arc<Product> {
    catalog
        .iter()
        .find(|product| product.id == id)
        .cloned()
        .unwrap_or_else(|| panic!("Product '{}' missing from test catalog", id))
}

#[tokio::test]
async fn configure_accept_aggregate_and_submit() {
    let catalog = load_test_catalog().await;

    // Pizza: base 20, extra +5 selected, quantity 2 -> 25 / 50
    let mut pizza = ProductConfigurator::new(find(&catalog, "pizza"));
    pizza.set_selection("additions", "extra", true).unwrap();
    pizza.set_quantity(2);
    assert_eq!(pizza.unit_price(), 25.0);
    assert_eq!(pizza.total_price(), 50.0);

    // Salad: base 30, default option at 3 deselected -> 27
    let mut salad = ProductConfigurator::new(find(&catalog, "salad"));
    salad.set_selection("base", "remove-x", false).unwrap();
    assert_eq!(salad.unit_price(), 27.0);

    // Cart with delivery fee 10 -> subtotal 77, grand total 87, 3 items
    let mut cart = Cart::new(10.0);
    cart.add_line(pizza.accept_for_cart());
    let salad_line = cart.add_line(salad.accept_for_cart());

    let totals = cart.totals();
    assert_eq!(totals.subtotal, 77.0);
    assert_eq!(totals.grand_total, 87.0);
    assert_eq!(totals.item_count, 3);

    // Submit, then keep mutating: the cart never locks around submission.
    let transport = RecordingTransport::new();
    let contact = ContactInfo {
        address: "12 Main St".to_string(),
        phone: "555-0101".to_string(),
    };

    let first_payload = cart.build_payload(contact.clone());
    transport.submit(&first_payload).await.unwrap();

    cart.remove_line(salad_line).unwrap();
    assert_eq!(cart.totals().subtotal, 50.0);
    assert_eq!(cart.totals().grand_total, 60.0);

    let second_payload = cart.build_payload(contact);
    transport.submit(&second_payload).await.unwrap();

    // Each submission is independent and reflects the cart at its moment.
    let submissions = transport.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].lines.len(), 2);
    assert_eq!(submissions[0].grand_total, 87.0);
    assert_eq!(submissions[1].lines.len(), 1);
    assert_eq!(submissions[1].grand_total, 60.0);
}

#[tokio::test]
async fn accepted_lines_do_not_follow_later_edits() {
    let catalog = load_test_catalog().await;

    let mut configurator = ProductConfigurator::new(find(&catalog, "pizza"));
    configurator.set_selection("additions", "extra", true).unwrap();
    configurator.set_quantity(2);

    let mut cart = Cart::new(0.0);
    cart.add_line(configurator.accept_for_cart());

    // The configurator keeps editing; the cart line must not move.
    configurator.set_selection("additions", "extra", false).unwrap();
    configurator.set_quantity(7);

    assert_eq!(cart.lines()[0].unit_price, 25.0);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.totals().subtotal, 50.0);
}

#[tokio::test]
async fn removing_a_never_added_line_is_rejected() {
    let catalog = load_test_catalog().await;

    let mut cart = Cart::new(10.0);
    cart.add_line(ProductConfigurator::new(find(&catalog, "pizza")).accept_for_cart());
    let before = cart.totals();

    let stranger = Uuid::new_v4();
    assert_eq!(
        cart.remove_line(stranger),
        Err(CartError::LineNotFound(stranger))
    );
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.totals(), before);
}

#[tokio::test]
async fn payload_uses_camel_case_wire_names() {
    let catalog = load_test_catalog().await;

    let mut configurator = ProductConfigurator::new(find(&catalog, "pizza"));
    configurator.set_selection("additions", "extra", true).unwrap();

    let mut cart = Cart::new(10.0);
    cart.add_line(configurator.accept_for_cart());

    let payload = cart.build_payload(ContactInfo {
        address: "12 Main St".to_string(),
        phone: "555-0101".to_string(),
    });
    let json = serde_json::to_value(&payload).unwrap();

    assert!(json.get("contactInfo").is_some());
    assert!(json.get("itemCount").is_some());
    assert!(json.get("subtotal").is_some());
    assert!(json.get("grandTotal").is_some());
    assert!(json.get("deliveryFee").is_some());

    let line = &json["lines"][0];
    assert_eq!(line["catalogItemId"], "pizza");
    assert_eq!(line["quantity"], 1);
    assert_eq!(line["unitPrice"], 25.0);
    assert_eq!(line["lineTotal"], 25.0);
    assert_eq!(
        line["chosenOptions"]["additions"]["options"]["extra"],
        "Extra"
    );
}
