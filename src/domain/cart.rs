use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::types::{ActivityId, CartItemId, null_as_default};

/// One line of the signed-in user's cart.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activity: Option<Activity>,
}

impl CartItem {
    /// Quantity times the activity's effective price; zero when the
    /// activity was not embedded.
    pub fn line_total(&self) -> i64 {
        self.activity
            .as_ref()
            .map(|activity| activity.effective_price() * i64::from(self.quantity))
            .unwrap_or(0)
    }
}

/// Body of `add-cart`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub activity_id: ActivityId,
}

/// Body of `update-cart/{id}`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct UpdateCartQuantity {
    pub quantity: u32,
}

/// Sum of the line totals of the selected cart lines.
pub fn selected_subtotal(items: &[CartItem], selected: &[CartItemId]) -> i64 {
    items
        .iter()
        .filter(|item| selected.contains(&item.id))
        .map(CartItem::line_total)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, discount: i64, quantity: u32) -> CartItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "quantity": quantity,
            "activity": {"id": format!("a-{id}"), "price": price, "price_discount": discount}
        }))
        .unwrap()
    }

    #[test]
    fn subtotal_counts_only_selected_lines() {
        let items = vec![item("1", 100, 0, 2), item("2", 300, 250, 1), item("3", 50, 0, 4)];
        let selected = vec![
            CartItemId::new("1").unwrap(),
            CartItemId::new("2").unwrap(),
        ];

        assert_eq!(selected_subtotal(&items, &selected), 450);
        assert_eq!(selected_subtotal(&items, &[]), 0);
    }
}
