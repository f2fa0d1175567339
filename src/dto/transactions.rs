use serde::Serialize;

use crate::domain::transaction::Transaction;
use crate::listing::ListPage;

/// Totals shown above the user's transaction history.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct TransactionSummary {
    pub count: usize,
    pub total_amount: i64,
    pub completed: usize,
}

/// One status tab of the back-office transaction screen.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusTab {
    pub value: String,
    pub label: String,
    pub count: usize,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub struct MyTransactionsPageData {
    pub summary: TransactionSummary,
    pub list: ListPage<Transaction>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminTransactionsPageData {
    pub tabs: Vec<StatusTab>,
    pub list: ListPage<Transaction>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransactionDetailPageData {
    pub transaction: Transaction,
    pub can_cancel: bool,
}
