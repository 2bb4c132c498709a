//! WooCommerce order model and Telegram message formatting.

pub mod formatter;
pub mod models;

pub use formatter::{FormatError, FormattedMessage, format_order_message};
pub use models::{Billing, LineItem, OrderRecord, Scalar, is_order};

use serde_json::{Value, json};

/// The reference order used by `--demo` and the tests.
pub fn sample_order() -> Value {
    json!({
        "id": 12345,
        "number": "WC-2024-12345",
        "date_created_gmt": "2024-07-30T10:30:00Z",
        "currency_symbol": "$",
        "total": "150.75",
        "billing": {
            "first_name": "John",
            "last_name": "Doe",
            "email": "john.doe@example.com",
            "phone": "123-456-7890",
            "address_1": "123 Main St",
            "address_2": "Apt 4B",
            "city": "Anytown",
            "state": "CA",
            "postcode": "90210",
            "country": "US"
        },
        "line_items": [
            {"name": "Awesome T-Shirt", "quantity": 2, "total": "50.50"},
            {"name": "Cool Mug", "quantity": 1, "total": "25.25"},
            {"name": "Another Product", "quantity": 3, "total": "75.00"}
        ]
    })
}
