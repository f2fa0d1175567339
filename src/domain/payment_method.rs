use serde::{Deserialize, Serialize};

use crate::domain::types::{PaymentMethodId, null_as_default};

/// Bank transfer option offered at checkout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub id: PaymentMethodId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "virtual_account_number")]
    pub virtual_account_number: String,
    #[serde(default, deserialize_with = "null_as_default", rename = "virtual_account_name")]
    pub virtual_account_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,
}
