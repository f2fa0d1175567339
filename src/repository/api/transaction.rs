use async_trait::async_trait;

use crate::domain::transaction::{NewTransaction, Transaction, UpdateTransactionStatus};
use crate::domain::types::{ApiToken, TransactionId};
use crate::repository::api::ApiRepository;
use crate::repository::errors::RepositoryResult;
use crate::repository::{TransactionReader, TransactionWriter};

#[async_trait]
impl TransactionReader for ApiRepository {
    async fn list_my_transactions(&self, token: &ApiToken) -> RepositoryResult<Vec<Transaction>> {
        self.fetch_list("my-transactions", Some(token)).await
    }

    async fn list_all_transactions(
        &self,
        token: &ApiToken,
    ) -> RepositoryResult<Vec<Transaction>> {
        self.fetch_list("all-transactions", Some(token)).await
    }

    async fn get_transaction(
        &self,
        token: &ApiToken,
        id: &TransactionId,
    ) -> RepositoryResult<Option<Transaction>> {
        self.fetch_optional(&format!("transaction/{id}"), Some(token))
            .await
    }
}

#[async_trait]
impl TransactionWriter for ApiRepository {
    async fn create_transaction(
        &self,
        token: &ApiToken,
        transaction: &NewTransaction,
    ) -> RepositoryResult<()> {
        self.post_json("create-transaction", Some(token), transaction)
            .await?;
        Ok(())
    }

    async fn cancel_transaction(
        &self,
        token: &ApiToken,
        id: &TransactionId,
    ) -> RepositoryResult<()> {
        self.post_empty(&format!("cancel-transaction/{id}"), token)
            .await
    }

    async fn update_transaction_status(
        &self,
        token: &ApiToken,
        id: &TransactionId,
        update: &UpdateTransactionStatus,
    ) -> RepositoryResult<()> {
        self.post_json(
            &format!("update-transaction-status/{id}"),
            Some(token),
            update,
        )
        .await?;
        Ok(())
    }
}
