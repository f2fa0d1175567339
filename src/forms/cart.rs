//! Cart forms. Checkout and cart selection carry repeated keys, so they are
//! parsed with `serde_html_form` rather than `serde_urlencoded`.

use serde::Deserialize;

use crate::domain::cart::{NewCartItem, UpdateCartQuantity};
use crate::domain::transaction::NewTransaction;
use crate::domain::types::{ActivityId, CartItemId, PaymentMethodId};
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub activity_id: String,
}

impl TryFrom<AddToCartForm> for NewCartItem {
    type Error = FormError;

    fn try_from(form: AddToCartForm) -> Result<Self, Self::Error> {
        Ok(Self {
            activity_id: ActivityId::new(form.activity_id)
                .map_err(|_| FormError::Missing("activity"))?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: u32,
}

impl TryFrom<QuantityForm> for UpdateCartQuantity {
    type Error = FormError;

    fn try_from(form: QuantityForm) -> Result<Self, Self::Error> {
        if form.quantity == 0 {
            return Err(FormError::Invalid("quantity"));
        }
        Ok(Self {
            quantity: form.quantity,
        })
    }
}

/// Cart lines ticked on the cart page, e.g. `?selected=a&selected=b`.
#[derive(Debug, Default, Deserialize)]
pub struct CartSelection {
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default)]
    pub all: Option<String>,
}

impl CartSelection {
    pub fn parse(query: &str) -> Self {
        serde_html_form::from_str(query).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed cart selection: {err}");
            Self::default()
        })
    }

    pub fn select_all(&self) -> bool {
        self.all.is_some()
    }

    pub fn ids(&self) -> Vec<CartItemId> {
        self.selected
            .iter()
            .filter_map(|id| CartItemId::new(id.as_str()).ok())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub cart_ids: Vec<String>,
    #[serde(default)]
    pub payment_method_id: String,
}

impl CheckoutForm {
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|err| {
            log::warn!("Malformed checkout form: {err}");
            FormError::Invalid("checkout form")
        })
    }
}

impl TryFrom<CheckoutForm> for NewTransaction {
    type Error = FormError;

    fn try_from(form: CheckoutForm) -> Result<Self, Self::Error> {
        let cart_ids = form
            .cart_ids
            .into_iter()
            .filter_map(|id| CartItemId::new(id).ok())
            .collect::<Vec<_>>();
        if cart_ids.is_empty() {
            return Err(FormError::Missing("at least one cart item"));
        }

        let payment_method_id = PaymentMethodId::new(form.payment_method_id)
            .map_err(|_| FormError::Missing("payment method"))?;

        Ok(Self {
            cart_ids,
            payment_method_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_parses_repeated_ids() {
        let form = CheckoutForm::parse(b"cart_ids=a&cart_ids=b&payment_method_id=p-1").unwrap();
        let transaction = NewTransaction::try_from(form).unwrap();
        assert_eq!(transaction.cart_ids.len(), 2);
        assert_eq!(transaction.payment_method_id.as_str(), "p-1");
    }

    #[test]
    fn checkout_requires_items_and_payment_method() {
        let form = CheckoutForm::parse(b"payment_method_id=p-1").unwrap();
        assert!(matches!(
            NewTransaction::try_from(form),
            Err(FormError::Missing("at least one cart item"))
        ));

        let form = CheckoutForm::parse(b"cart_ids=a").unwrap();
        assert!(matches!(
            NewTransaction::try_from(form),
            Err(FormError::Missing("payment method"))
        ));
    }

    #[test]
    fn selection_reads_repeated_keys() {
        let selection = CartSelection::parse("selected=a&selected=b");
        assert_eq!(selection.ids().len(), 2);
        assert!(!selection.select_all());
        assert!(CartSelection::parse("all=1").select_all());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        assert!(UpdateCartQuantity::try_from(QuantityForm { quantity: 0 }).is_err());
    }
}
