//! Coin wallet.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Economy error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    /// Insufficient funds
    #[error("Insufficient funds: need {needed}, have {have}")]
    InsufficientFunds {
        /// Amount needed
        needed: u64,
        /// Amount available
        have: u64,
    },
}

/// Result type for economy operations.
pub type EconomyResult<T> = Result<T, EconomyError>;

/// The player's coin balance. Never negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wallet {
    coins: u64,
}

impl Wallet {
    /// Creates a wallet holding `initial` coins.
    #[must_use]
    pub const fn new(initial: u64) -> Self {
        Self { coins: initial }
    }

    /// Returns the balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.coins
    }

    /// Checks if the balance covers `amount`.
    #[must_use]
    pub const fn can_afford(&self, amount: u64) -> bool {
        self.coins >= amount
    }

    /// Adds coins to the wallet.
    pub fn earn(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Removes coins from the wallet.
    pub fn spend(&mut self, amount: u64) -> EconomyResult<()> {
        if self.coins < amount {
            return Err(EconomyError::InsufficientFunds {
                needed: amount,
                have: self.coins,
            });
        }
        self.coins -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_transactions() {
        let mut wallet = Wallet::new(250);

        assert!(wallet.spend(100).is_ok());
        assert_eq!(wallet.balance(), 150);

        wallet.earn(180);
        assert_eq!(wallet.balance(), 330);
    }

    #[test]
    fn test_wallet_refuses_overdraft() {
        let mut wallet = Wallet::new(99);
        assert_eq!(
            wallet.spend(100),
            Err(EconomyError::InsufficientFunds {
                needed: 100,
                have: 99,
            })
        );
        assert_eq!(wallet.balance(), 99);
    }

    #[test]
    fn test_spend_exact_balance() {
        let mut wallet = Wallet::new(300);
        assert!(wallet.can_afford(300));
        assert!(wallet.spend(300).is_ok());
        assert_eq!(wallet.balance(), 0);
        assert!(wallet.can_afford(0));
    }
}
