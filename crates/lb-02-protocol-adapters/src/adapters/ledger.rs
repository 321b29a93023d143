//! # In-Memory Ledger
//!
//! Reference implementation of the [`TokenLedger`] capability: per-account
//! balances plus the cumulative mint/burn counters the supply oracle reads.
//! Used by tests and the runtime demo wiring; a production deployment
//! substitutes the real ledger client behind the same port.

use crate::ports::TokenLedger;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, Amount};
use std::collections::HashMap;

#[derive(Default)]
struct LedgerState {
    balances: HashMap<Address, Amount>,
    total_minted: Amount,
    total_burned: Amount,
}

/// In-memory token ledger with mint/burn counters.
#[derive(Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a balance without touching the mint counter.
    pub async fn credit(&self, account: Address, amount: Amount) {
        let mut state = self.state.write();
        *state.balances.entry(account).or_insert(0) += amount;
    }

    /// Current balance of an account.
    pub async fn balance_of(&self, account: &Address) -> Amount {
        self.state.read().balances.get(account).copied().unwrap_or(0)
    }
}

#[async_trait]
impl TokenLedger for InMemoryLedger {
    async fn mint(&self, recipient: Address, amount: Amount) -> Result<(), String> {
        let mut state = self.state.write();
        *state.balances.entry(recipient).or_insert(0) += amount;
        state.total_minted = state.total_minted.saturating_add(amount);
        Ok(())
    }

    async fn burn(&self, holder: Address, amount: Amount) -> Result<(), String> {
        let mut state = self.state.write();
        let balance = state.balances.get(&holder).copied().unwrap_or(0);
        if balance < amount {
            return Err(format!(
                "insufficient balance: {} < {}",
                balance, amount
            ));
        }
        state.balances.insert(holder, balance - amount);
        state.total_burned = state.total_burned.saturating_add(amount);
        Ok(())
    }

    async fn total_minted(&self) -> Amount {
        self.state.read().total_minted
    }

    async fn total_burned(&self) -> Amount {
        self.state.read().total_burned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mint_credits_and_counts() {
        let ledger = InMemoryLedger::new();
        ledger.mint([1u8; 20], 500).await.unwrap();
        assert_eq!(ledger.balance_of(&[1u8; 20]).await, 500);
        assert_eq!(ledger.total_minted().await, 500);
    }

    #[tokio::test]
    async fn test_burn_requires_balance() {
        let ledger = InMemoryLedger::new();
        ledger.credit([1u8; 20], 100).await;

        assert!(ledger.burn([1u8; 20], 200).await.is_err());
        assert_eq!(ledger.total_burned().await, 0);

        ledger.burn([1u8; 20], 100).await.unwrap();
        assert_eq!(ledger.balance_of(&[1u8; 20]).await, 0);
        assert_eq!(ledger.total_burned().await, 100);
    }

    #[tokio::test]
    async fn test_credit_does_not_count_as_mint() {
        let ledger = InMemoryLedger::new();
        ledger.credit([1u8; 20], 100).await;
        assert_eq!(ledger.total_minted().await, 0);
    }
}
