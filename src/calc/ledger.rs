// src/calc/ledger.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    calc::{
        LedgerError,
        pagination::{Page, paginate},
    },
    models::transaction::{Transaction, TransactionType},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
}

/// Income/expense totals over the whole set, regardless of which page is shown.
pub fn summarize_transactions(items: &[Transaction]) -> Result<TransactionSummary, LedgerError> {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;

    for tx in items {
        match tx.kind {
            TransactionType::Income => {
                total_income = total_income
                    .checked_add(tx.amount)
                    .ok_or(LedgerError::Overflow("income"))?;
            }
            TransactionType::Expense => {
                total_expense = total_expense
                    .checked_add(tx.amount)
                    .ok_or(LedgerError::Overflow("expense"))?;
            }
        }
    }

    let balance = total_income
        .checked_sub(total_expense)
        .ok_or(LedgerError::Overflow("balance"))?;

    Ok(TransactionSummary {
        total_income,
        total_expense,
        balance,
    })
}

/// A fetched transaction list with its summary.
///
/// The summary is computed when the set changes, not when the page does.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    summary: TransactionSummary,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        let summary = summarize_transactions(&transactions)?;
        Ok(Self {
            transactions,
            summary,
        })
    }

    /// Swaps in a refreshed set. On error the previous set is kept.
    pub fn replace(&mut self, transactions: Vec<Transaction>) -> Result<(), LedgerError> {
        self.summary = summarize_transactions(&transactions)?;
        self.transactions = transactions;
        Ok(())
    }

    pub fn summary(&self) -> &TransactionSummary {
        &self.summary
    }

    pub fn page(&self, page: usize, page_size: usize) -> Page<Transaction> {
        paginate(&self.transactions, page, page_size)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
