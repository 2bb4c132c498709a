//! Order → Telegram message rendering.
//!
//! The output is Telegram HTML (`parse_mode=HTML`), so every value lifted from
//! the payload is escaped before it is spliced into the template.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use super::models::{Billing, LineItem, OrderRecord, Scalar};

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const NO_ITEMS_PLACEHOLDER: &str = "No items in order or items not provided in webhook.";
pub const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("order payload is not a JSON object")]
    NotAnObject,

    #[error("malformed order payload: {0}")]
    Malformed(String),
}

/// A rendered order notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    order_number: String,
    text: String,
}

impl FormattedMessage {
    /// Order number as displayed (unescaped), for logging
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for FormattedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render a webhook body as a Telegram HTML message.
///
/// Never panics: a payload that cannot be read as an order comes back as a
/// [`FormatError`] and is logged here.
pub fn format_order_message(value: &Value) -> Result<FormattedMessage, FormatError> {
    match OrderRecord::from_value(value) {
        Ok(order) => {
            let message = render(&order);
            info!(
                order_number = %message.order_number(),
                "[FORMAT] formatted message for order {}",
                message.order_number()
            );
            Ok(message)
        }
        Err(e) => {
            error!("[FORMAT] error formatting order message: {}", e);
            Err(e)
        }
    }
}

/// Render an already-parsed order. Infallible.
pub fn render(order: &OrderRecord) -> FormattedMessage {
    let order_number = first_present(&[&order.number, &order.id])
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let order_date = first_present(&[&order.date_created_gmt, &order.date_created])
        .map(|raw| format_order_date(&raw))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let currency = text_or(&order.currency_symbol, DEFAULT_CURRENCY_SYMBOL);
    let order_total = text_or(&order.total, NOT_AVAILABLE);

    let default_billing = Billing::default();
    let billing = order.billing.as_ref().unwrap_or(&default_billing);

    let customer_name = customer_name(billing);
    let customer_email = text_or(&billing.email, NOT_AVAILABLE);
    let customer_phone = text_or(&billing.phone, NOT_AVAILABLE);
    let address = format_address(billing);
    let items = format_line_items(order.line_items.as_deref().unwrap_or_default(), &currency);

    let text = format!(
        "<b>🔔 New WooCommerce Order!</b>\n\n\
         <b>Order #:</b> {number}\n\
         <b>Date:</b> {date}\n\n\
         <b><u>👤 Customer:</u></b>\n\
         <b>Name:</b> {name}\n\
         <b>Email:</b> {email}\n\
         <b>Phone:</b> {phone}\n\n\
         <b><u>📬 Billing Address:</u></b>\n\
         {address}\n\n\
         <b><u>🛍️ Items:</u></b>\n\
         {items}\n\
         <b>💰 Order Total: {currency}{total}</b>",
        number = escape_html(&order_number),
        date = escape_html(&order_date),
        name = escape_html(&customer_name),
        email = escape_html(&customer_email),
        phone = escape_html(&customer_phone),
        address = escape_html(&address),
        items = items,
        currency = escape_html(&currency),
        total = escape_html(&order_total),
    );

    FormattedMessage { order_number, text }
}

/// Render an ISO-8601 timestamp as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Unparseable input is returned unchanged.
pub fn format_order_date(raw: &str) -> String {
    match parse_iso8601(raw) {
        Some(dt) => dt.format(DATE_DISPLAY_FORMAT).to_string(),
        None => {
            warn!("[FORMAT] could not parse date: {}", raw);
            raw.to_string()
        }
    }
}

/// Accepts `Z`, numeric offsets, no offset (read as UTC) and bare dates.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let with_offset = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(stripped) => format!("{}+00:00", stripped),
        None => s.to_string(),
    };
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"] {
        if let Ok(dt) = DateTime::parse_from_str(&with_offset, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Billing address block, one component per line, blanks dropped.
pub fn format_address(billing: &Billing) -> String {
    let city = text_or(&billing.city, "");
    let region = [text_or(&billing.state, ""), text_or(&billing.postcode, "")]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let locality = match (city.is_empty(), region.is_empty()) {
        (false, false) => format!("{}, {}", city, region),
        (false, true) => city,
        (true, false) => region,
        (true, true) => String::new(),
    };

    let lines: Vec<String> = [
        text_or(&billing.address_1, ""),
        text_or(&billing.address_2, ""),
        locality,
        text_or(&billing.country, ""),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect();

    if lines.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        lines.join("\n")
    }
}

/// One `- <qty>x <name> (Total: <currency><amount>)` line per item, already escaped.
pub fn format_line_items(items: &[LineItem], currency: &str) -> String {
    if items.is_empty() {
        return format!("{}\n", NO_ITEMS_PLACEHOLDER);
    }

    let currency = escape_html(currency);
    items
        .iter()
        .map(|item| {
            format!(
                "- {}x {} (Total: {}{})\n",
                escape_html(&text_or(&item.quantity, NOT_AVAILABLE)),
                escape_html(&text_or(&item.name, NOT_AVAILABLE)),
                currency,
                escape_html(&text_or(&item.total, NOT_AVAILABLE)),
            )
        })
        .collect()
}

fn customer_name(billing: &Billing) -> String {
    let full = format!(
        "{} {}",
        text_or(&billing.first_name, ""),
        text_or(&billing.last_name, "")
    );
    let trimmed = full.trim();
    if trimmed.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Escape the three characters Telegram's HTML parse mode reserves.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn present(field: &Option<Scalar>) -> Option<String> {
    field
        .as_ref()
        .filter(|s| !s.is_blank())
        .map(|s| s.to_string())
}

fn first_present(fields: &[&Option<Scalar>]) -> Option<String> {
    fields.iter().find_map(|f| present(f))
}

fn text_or(field: &Option<Scalar>, fallback: &str) -> String {
    present(field).unwrap_or_else(|| fallback.to_string())
}
