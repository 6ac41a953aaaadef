use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    AddFunds,
    JoinContest,
    PrizeReward,
    #[serde(other)]
    Other,
}

impl TransactionType {
    /// Whether the transaction increased the balance.
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionType::AddFunds | TransactionType::PrizeReward)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "transaction_type", alias = "type")]
    pub kind: TransactionType,
    /// Signed: debits arrive negative.
    pub amount: f64,
    #[serde(default)]
    pub description: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Amount with an explicit sign, e.g. "+100₹" or "-50₹".
    pub fn signed_amount(&self) -> String {
        if self.amount >= 0.0 {
            format!("+{}₹", self.amount)
        } else {
            format!("{}₹", self.amount)
        }
    }
}

/// Aggregates from `GET /wallet/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletStats {
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub total_added: f64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_winnings: f64,
    #[serde(default)]
    pub net_profit: f64,
}

impl WalletStats {
    pub fn net_profit_label(&self) -> String {
        if self.net_profit >= 0.0 {
            format!("+{:.2}₹", self.net_profit)
        } else {
            format!("{:.2}₹", self.net_profit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_transaction_kinds() {
        let json = r#"[
            {"id": 1, "transaction_type": "add_funds", "amount": 100, "created_at": "2024-07-15T12:00:00"},
            {"id": 2, "transaction_type": "join_contest", "amount": -50, "created_at": "2024-07-15T12:05:00"},
            {"id": 3, "transaction_type": "refund_reversal", "amount": 5, "created_at": "2024-07-15T12:06:00"}
        ]"#;
        let txs: Vec<Transaction> = serde_json::from_str(json).unwrap();
        assert_eq!(txs[0].kind, TransactionType::AddFunds);
        assert_eq!(txs[0].signed_amount(), "+100₹");
        assert_eq!(txs[1].signed_amount(), "-50₹");
        assert!(!txs[1].kind.is_credit());
        assert_eq!(txs[2].kind, TransactionType::Other);
    }

    #[test]
    fn test_net_profit_label() {
        let stats = WalletStats {
            net_profit: -12.5,
            ..Default::default()
        };
        assert_eq!(stats.net_profit_label(), "-12.50₹");
        assert_eq!(WalletStats::default().net_profit_label(), "+0.00₹");
    }
}
