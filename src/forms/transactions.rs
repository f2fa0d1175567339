use serde::Deserialize;

use crate::domain::transaction::{TransactionStatus, UpdateTransactionStatus};
use crate::forms::FormError;

/// Admin decision on a pending transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionStatusForm {
    pub status: String,
}

impl TryFrom<TransactionStatusForm> for UpdateTransactionStatus {
    type Error = FormError;

    fn try_from(form: TransactionStatusForm) -> Result<Self, Self::Error> {
        match TransactionStatus::parse(&form.status) {
            status @ (TransactionStatus::Success | TransactionStatus::Failed) => {
                Ok(Self { status })
            }
            _ => Err(FormError::Invalid("status")),
        }
    }
}
