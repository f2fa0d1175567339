use serde::Serialize;

use crate::domain::cart::CartItem;
use crate::domain::payment_method::PaymentMethod;

#[derive(Debug, Serialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: CartItem,
    pub selected: bool,
    pub line_total: i64,
}

#[derive(Debug, Serialize)]
pub struct CartPageData {
    pub lines: Vec<CartLine>,
    pub payment_methods: Vec<PaymentMethod>,
    pub selected_count: usize,
    pub all_selected: bool,
    pub subtotal: i64,
    pub error: Option<String>,
}
