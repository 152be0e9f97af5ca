// src/models/transaction.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::models::lenient;

/// One row of a center's account ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(deserialize_with = "lenient::int_id")]
    pub id: i64,

    #[serde(deserialize_with = "lenient::decimal")]
    pub amount: Decimal,

    /// Mapped from the `type` field since `type` is a reserved keyword in Rust.
    #[serde(rename = "type", alias = "txn_type")]
    pub kind: TransactionType,

    #[serde(default)]
    pub date: String,

    /// Payment mode (cash, UPI, bank transfer...).
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub mode: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Case-insensitive; also accepts the `credit`/`debit` spelling some endpoints use.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" | "credit" | "cr" => Some(TransactionType::Income),
            "expense" | "debit" | "dr" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for TransactionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        TransactionType::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown transaction type {raw:?}")))
    }
}
