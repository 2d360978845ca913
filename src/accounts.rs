use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::Keyed;

#[derive(Error, Debug, PartialEq)]
pub enum AccountError {
    #[error("insufficient funds")]
    InsufficientFunds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Plain,
    Special,
    Savings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    number: String,
    kind: AccountKind,
    balance: Decimal,
}

impl Account {
    pub fn new(number: impl Into<String>, kind: AccountKind, balance: Decimal) -> Account {
        Account {
            number: number.into(),
            kind,
            balance,
        }
    }
    pub fn number(&self) -> &str {
        &self.number
    }
    pub fn kind(&self) -> AccountKind {
        self.kind
    }
    pub fn balance(&self) -> Decimal {
        self.balance
    }
    pub fn credit(&mut self, amount: Decimal) {
        self.balance = self.balance + amount;
    }
    pub fn debit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let balance = self.balance - amount;
        if balance < Decimal::from(0) {
            return Err(AccountError::InsufficientFunds);
        }
        self.balance = balance;
        Ok(())
    }
    /// accrue grows the balance by the variant rate: 1% bonus for special
    /// accounts, 0.5% interest for savings accounts. Plain accounts accrue
    /// nothing.
    pub fn accrue(&mut self) {
        let rate = match self.kind {
            AccountKind::Special => Decimal::new(1, 2),
            AccountKind::Savings => Decimal::new(5, 3),
            AccountKind::Plain => return,
        };
        self.balance = self.balance + self.balance * rate;
    }
}

impl Keyed for Account {
    fn key(&self) -> &str {
        &self.number
    }
}
