use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::payment_method::PaymentMethod;
use crate::domain::types::{CartItemId, PaymentMethodId, TransactionId, null_as_default};
use crate::listing::{FilterField, Filterable};

/// Lifecycle state of a transaction as reported by the remote API.
///
/// Unknown states are kept verbatim so they still render and filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Success,
    Cancelled,
    Failed,
    Other(String),
}

impl TransactionStatus {
    /// Known states in the order the dashboard tabs show them.
    pub const KNOWN: [TransactionStatus; 4] = [
        TransactionStatus::Pending,
        TransactionStatus::Success,
        TransactionStatus::Cancelled,
        TransactionStatus::Failed,
    ];

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => TransactionStatus::Pending,
            "success" => TransactionStatus::Success,
            "cancelled" | "canceled" => TransactionStatus::Cancelled,
            "failed" => TransactionStatus::Failed,
            _ => TransactionStatus::Other(value.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Cancelled => "cancelled",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Other(value) => value.as_str(),
        }
    }

    /// Capitalised label, e.g. `Pending`.
    pub fn label(&self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// CSS class of the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "badge-warning",
            TransactionStatus::Success => "badge-success",
            TransactionStatus::Cancelled => "badge-secondary",
            TransactionStatus::Failed => "badge-danger",
            TransactionStatus::Other(_) => "badge-light",
        }
    }

    /// Only pending transactions can still be cancelled or confirmed.
    pub fn is_open(&self) -> bool {
        matches!(self, TransactionStatus::Pending)
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TransactionStatus::parse(&raw))
    }
}

/// Snapshot of a booked activity inside a transaction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: i64,
    #[serde(default, deserialize_with = "null_as_default", rename = "price_discount")]
    pub price_discount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
}

impl TransactionItem {
    pub fn line_total(&self) -> i64 {
        let unit = if self.price_discount > 0 {
            self.price_discount
        } else {
            self.price
        };
        unit * i64::from(self.quantity)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub payment_method_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub invoice_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TransactionStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_amount: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proof_payment_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expired_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default", rename = "payment_method")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "null_as_default", rename = "transaction_items")]
    pub transaction_items: Vec<TransactionItem>,
}

impl Transaction {
    pub fn payment_method_name(&self) -> Option<&str> {
        self.payment_method.as_ref().map(|method| method.name.as_str())
    }
}

/// Body of `create-transaction`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub cart_ids: Vec<CartItemId>,
    pub payment_method_id: PaymentMethodId,
}

/// Body of `update-transaction-status/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateTransactionStatus {
    pub status: TransactionStatus,
}

/// Dropdown (tabs) target the status; search text matches invoice id or
/// payment method name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransactionField {
    #[default]
    Status,
    InvoiceId,
    PaymentMethod,
}

impl TransactionField {
    pub const SEARCHED: &'static [TransactionField] =
        &[TransactionField::InvoiceId, TransactionField::PaymentMethod];
}

impl FilterField for TransactionField {
    const ALL: &'static [Self] = &[TransactionField::Status];

    fn as_str(self) -> &'static str {
        match self {
            TransactionField::Status => "status",
            TransactionField::InvoiceId => "invoice",
            TransactionField::PaymentMethod => "payment_method",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TransactionField::Status => "Status",
            TransactionField::InvoiceId => "Invoice",
            TransactionField::PaymentMethod => "Payment method",
        }
    }
}

impl Filterable for Transaction {
    type Field = TransactionField;

    fn field_value(&self, field: TransactionField) -> Option<Cow<'_, str>> {
        match field {
            TransactionField::Status => Some(Cow::Borrowed(self.status.as_str())),
            TransactionField::InvoiceId => Some(Cow::Borrowed(self.invoice_id.as_str())),
            TransactionField::PaymentMethod => self.payment_method_name().map(Cow::Borrowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_fields_in_a_transaction_fall_back_to_defaults() {
        let transaction: Transaction = serde_json::from_str(
            r#"{
                "id": "t-1",
                "invoiceId": null,
                "status": null,
                "totalAmount": null,
                "payment_method": null,
                "transaction_items": [{"id": "i-1", "title": null, "price": 100, "quantity": null}]
            }"#,
        )
        .unwrap();

        assert_eq!(transaction.invoice_id, "");
        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert_eq!(transaction.total_amount, 0);
        assert_eq!(transaction.payment_method_name(), None);
        assert_eq!(transaction.transaction_items[0].title, "");
        assert_eq!(transaction.transaction_items[0].line_total(), 0);
    }

    #[test]
    fn status_parses_case_insensitively_and_keeps_unknown_values() {
        assert_eq!(TransactionStatus::parse("SUCCESS"), TransactionStatus::Success);
        assert_eq!(TransactionStatus::parse("canceled"), TransactionStatus::Cancelled);
        assert_eq!(
            TransactionStatus::parse("refunded"),
            TransactionStatus::Other("refunded".to_string())
        );
    }

    #[test]
    fn status_badge_and_label() {
        assert_eq!(TransactionStatus::Pending.label(), "Pending");
        assert_eq!(TransactionStatus::Failed.badge_class(), "badge-danger");
        assert_eq!(
            TransactionStatus::Other("refunded".into()).label(),
            "Refunded"
        );
        assert!(TransactionStatus::Pending.is_open());
        assert!(!TransactionStatus::Success.is_open());
    }

    #[test]
    fn decodes_remote_transaction() {
        let transaction: Transaction = serde_json::from_str(
            r#"{
                "id": "t-1",
                "invoiceId": "INV/001",
                "status": "Pending",
                "totalAmount": 900000,
                "payment_method": {"id": "p-1", "name": "BCA"},
                "transaction_items": [{"id": "a-1", "title": "Snorkeling", "price": 500000, "price_discount": 450000, "quantity": 2}]
            }"#,
        )
        .unwrap();

        assert_eq!(transaction.status, TransactionStatus::Pending);
        assert_eq!(transaction.payment_method_name(), Some("BCA"));
        assert_eq!(transaction.transaction_items[0].line_total(), 900000);
        assert_eq!(
            transaction
                .field_value(TransactionField::InvoiceId)
                .as_deref(),
            Some("INV/001")
        );
    }

    #[test]
    fn new_transaction_uses_camel_case() {
        let payload = NewTransaction {
            cart_ids: vec![CartItemId::new("c-1").unwrap()],
            payment_method_id: PaymentMethodId::new("p-1").unwrap(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["cartIds"][0], "c-1");
        assert_eq!(json["paymentMethodId"], "p-1");
    }
}
