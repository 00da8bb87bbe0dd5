use crate::display::{decode, urdu_for};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How a line item is measured.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Piece,
    Dozen,
    Bundle,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Unit::Kg => "kg",
            Unit::Piece => "piece",
            Unit::Dozen => "dozen",
            Unit::Bundle => "bundle",
        })
    }
}

/// One cart row as the page submits it.
///
/// `total` is the `qty * rate` the page computed when the row was added and
/// is rendered as sent.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LineItem {
    pub display: String,
    pub qty: f64,
    pub unit: Unit,
    pub rate: f64,
    pub total: f64,
}

impl LineItem {
    /// Quantity and unit as one cell, e.g. `2 kg` or `1.5 dozen`.
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.qty, self.unit)
    }
}

/// Body of a generate request.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct InvoiceRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

/// A request that passed validation and is ready to render.
#[derive(Clone, Debug)]
pub struct Invoice {
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<LineItem>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InvoiceError {
    #[error("Customer name required")]
    MissingCustomerName,
    #[error("No items provided")]
    NoItems,
}

impl InvoiceRequest {
    pub fn validate(self) -> Result<Invoice, InvoiceError> {
        let customer_name = self.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(InvoiceError::MissingCustomerName);
        }
        if self.items.is_empty() {
            return Err(InvoiceError::NoItems);
        }

        Ok(Invoice {
            customer_name,
            customer_phone: self.customer_phone.trim().to_string(),
            items: self.items,
        })
    }
}

impl Invoice {
    pub fn grand_total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }
}

/// Item name as printed on the invoice
///
/// The size is folded back into both names: `ٹماٹر (Tomato) (Large)` becomes
/// `ٹماٹر بڑا سائز (Tomato big size)`. When the display string has no Urdu
/// name the catalog is consulted; if that fails too only the English form is
/// printed.
pub fn item_label(display: &str) -> String {
    let item = decode(display);
    let urdu = if item.urdu.is_empty() {
        urdu_for(&item.english).to_string()
    } else {
        item.urdu
    };

    let english = match item.size.english_phrase() {
        Some(phrase) => format!("{} {}", item.english, phrase),
        None => item.english,
    };

    if urdu.is_empty() {
        return english;
    }

    match item.size.urdu_phrase() {
        Some(phrase) => format!("{} {} ({})", urdu, phrase, english),
        None => format!("{} ({})", urdu, english),
    }
}
