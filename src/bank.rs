use anyhow::Result;
use rust_decimal::prelude::*;
use thiserror::Error;
use tracing::warn;

use crate::accounts::{Account, AccountKind};
use crate::clients::Client;
use crate::repository::Repository;

#[derive(Error, Debug, PartialEq)]
pub enum BankError {
    #[error("client already registered")]
    ClientAlreadyRegistered,
    #[error("account already registered")]
    AccountAlreadyRegistered,
    #[error("client not registered")]
    ClientNotRegistered,
    #[error("account not found")]
    AccountNotFound,
    #[error("account already associated with a client")]
    AccountAlreadyAssociated,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("repository update failed")]
    UpdateFailed,
    #[error("bonus accrues on special accounts only")]
    WrongAccountTypeForBonus,
    #[error("interest accrues on savings accounts only")]
    WrongAccountTypeForInterest,
    #[error("insufficient balance")]
    InsufficientBalance,
}

/// What to do when the account repository rejects an update on the
/// credit/debit/transfer/accrue paths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdatePolicy {
    /// Surface the rejection as `UpdateFailed`.
    Strict,
    /// Log the rejection and carry on; the caller's entity keeps its
    /// previous state so it never diverges from storage.
    Lenient,
}

/// The back-office service. All business rules live here; the two
/// repositories are plain key-value stores with no knowledge of each other.
pub struct Bank<'a> {
    clients: &'a dyn Repository<Client>,
    accounts: &'a dyn Repository<Account>,
    update_policy: UpdatePolicy,
}

impl<'a> Bank<'a> {
    pub fn new(
        clients: &'a dyn Repository<Client>,
        accounts: &'a dyn Repository<Account>,
        update_policy: UpdatePolicy,
    ) -> Bank<'a> {
        Bank {
            clients,
            accounts,
            update_policy,
        }
    }

    pub fn register_client(&self, client: Client) -> Result<()> {
        if !self.clients.insert(client)? {
            return Err(BankError::ClientAlreadyRegistered.into());
        }
        Ok(())
    }

    pub fn find_client(&self, id: &str) -> Result<Option<Client>> {
        self.clients.find(id)
    }

    pub fn register_account(&self, account: Account) -> Result<()> {
        if !self.accounts.insert(account)? {
            return Err(BankError::AccountAlreadyRegistered.into());
        }
        Ok(())
    }

    pub fn find_account(&self, number: &str) -> Result<Option<Account>> {
        self.accounts.find(number)
    }

    /// Links an account to a client. An account belongs to at most one
    /// client system-wide, so every registered client is scanned before the
    /// link is made.
    pub fn associate(&self, client_id: &str, account_number: &str) -> Result<()> {
        let account = self
            .accounts
            .find(account_number)?
            .ok_or(BankError::AccountNotFound)?;
        let mut client = self
            .clients
            .find(client_id)?
            .ok_or(BankError::ClientNotRegistered)?;
        for other in self.clients.get_all()? {
            if other.has_account(account.number()) {
                return Err(BankError::AccountAlreadyAssociated.into());
            }
        }
        client.add_account(account.number());
        if !self.clients.update(client)? {
            return Err(BankError::UpdateFailed.into());
        }
        Ok(())
    }

    /// Removes the client record. Accounts the client was associated with
    /// stay registered and become free for association again.
    pub fn remove_client(&self, id: &str) -> Result<()> {
        self.clients
            .find(id)?
            .ok_or(BankError::ClientNotRegistered)?;
        self.clients.remove(id)?;
        Ok(())
    }

    /// Deletes the account and detaches it from the client. The client is
    /// re-resolved by id first; both entities must exist before anything is
    /// mutated.
    pub fn remove_account(&self, client: &mut Client, number: &str) -> Result<()> {
        let mut current = self
            .clients
            .find(client.id())?
            .ok_or(BankError::ClientNotRegistered)?;
        self.accounts
            .find(number)?
            .ok_or(BankError::AccountNotFound)?;
        self.accounts.remove(number)?;
        current.remove_account(number);
        if !self.clients.update(current.clone())? {
            return Err(BankError::UpdateFailed.into());
        }
        *client = current;
        Ok(())
    }

    pub fn credit(&self, account: &mut Account, amount: Decimal) -> Result<()> {
        if amount < Decimal::from(0) {
            return Err(BankError::InvalidAmount.into());
        }
        let mut updated = account.clone();
        updated.credit(amount);
        if self.persist_account(&updated)? {
            *account = updated;
        }
        Ok(())
    }

    pub fn debit(&self, account: &mut Account, amount: Decimal) -> Result<()> {
        if amount < Decimal::from(0) {
            return Err(BankError::InvalidAmount.into());
        }
        if !self.accounts.exists(account.number())? {
            return Err(BankError::AccountNotFound.into());
        }
        let mut updated = account.clone();
        updated
            .debit(amount)
            .map_err(|_| BankError::InsufficientBalance)?;
        if self.persist_account(&updated)? {
            *account = updated;
        }
        Ok(())
    }

    pub fn transfer(
        &self,
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<()> {
        if amount < Decimal::from(0) {
            return Err(BankError::InvalidAmount.into());
        }
        if !self.accounts.exists(source.number())? {
            return Err(BankError::AccountNotFound.into());
        }
        if !self.accounts.exists(destination.number())? {
            return Err(BankError::AccountNotFound.into());
        }
        let mut debited = source.clone();
        debited
            .debit(amount)
            .map_err(|_| BankError::InsufficientBalance)?;
        let mut credited = destination.clone();
        credited.credit(amount);
        if self.persist_account(&debited)? {
            *source = debited;
        }
        // not atomic: a rejected destination update leaves the source
        // already debited
        if self.persist_account(&credited)? {
            *destination = credited;
        }
        Ok(())
    }

    pub fn accrue_bonus(&self, account: &mut Account) -> Result<()> {
        if !self.accounts.exists(account.number())? {
            return Err(BankError::AccountNotFound.into());
        }
        if account.kind() != AccountKind::Special {
            return Err(BankError::WrongAccountTypeForBonus.into());
        }
        self.accrue(account)
    }

    pub fn accrue_interest(&self, account: &mut Account) -> Result<()> {
        if !self.accounts.exists(account.number())? {
            return Err(BankError::AccountNotFound.into());
        }
        if account.kind() != AccountKind::Savings {
            return Err(BankError::WrongAccountTypeForInterest.into());
        }
        self.accrue(account)
    }

    pub fn update_client(&self, client: Client) -> Result<()> {
        if !self.clients.update(client)? {
            return Err(BankError::UpdateFailed.into());
        }
        Ok(())
    }

    fn accrue(&self, account: &mut Account) -> Result<()> {
        let mut updated = account.clone();
        updated.accrue();
        if self.persist_account(&updated)? {
            *account = updated;
        }
        Ok(())
    }

    // Returns whether the update was persisted; a rejection is an error or
    // a warning depending on the policy.
    fn persist_account(&self, account: &Account) -> Result<bool> {
        if self.accounts.update(account.clone())? {
            return Ok(true);
        }
        match self.update_policy {
            UpdatePolicy::Strict => Err(BankError::UpdateFailed.into()),
            UpdatePolicy::Lenient => {
                warn!(
                    account = account.number(),
                    "account update rejected, keeping previous state"
                );
                Ok(false)
            }
        }
    }
}
