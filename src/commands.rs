use std::convert::TryFrom;

use anyhow::{anyhow, Result};
use rust_decimal::prelude::*;
use serde::Deserialize;

use crate::accounts::AccountKind;

/// One CSV row of the operations file. Only `op` is always present; the
/// other columns depend on the operation.
#[derive(Debug, Deserialize)]
pub struct OpRecord {
    pub op: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub kind: Option<AccountKind>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpCommand {
    RegisterClient { id: String, name: String },
    RegisterAccount { number: String, kind: AccountKind, balance: Decimal },
    Associate { client: String, account: String },
    RemoveClient { id: String },
    RemoveAccount { client: String, account: String },
    Credit { account: String, amount: Decimal },
    Debit { account: String, amount: Decimal },
    Transfer { from: String, to: String, amount: Decimal },
    AccrueBonus { account: String },
    AccrueInterest { account: String },
}

fn required<T>(field: Option<T>, name: &str) -> Result<T> {
    field.ok_or_else(|| anyhow!("missing column {:?}", name))
}

impl TryFrom<OpRecord> for OpCommand {
    type Error = anyhow::Error;
    fn try_from(record: OpRecord) -> Result<OpCommand> {
        match record.op.as_str() {
            "register_client" => Ok(OpCommand::RegisterClient {
                id: required(record.client, "client")?,
                name: required(record.name, "name")?,
            }),
            "register_account" => Ok(OpCommand::RegisterAccount {
                number: required(record.account, "account")?,
                kind: required(record.kind, "kind")?,
                balance: record.amount.unwrap_or_else(|| Decimal::from(0)),
            }),
            "associate" => Ok(OpCommand::Associate {
                client: required(record.client, "client")?,
                account: required(record.account, "account")?,
            }),
            "remove_client" => Ok(OpCommand::RemoveClient {
                id: required(record.client, "client")?,
            }),
            "remove_account" => Ok(OpCommand::RemoveAccount {
                client: required(record.client, "client")?,
                account: required(record.account, "account")?,
            }),
            "credit" => Ok(OpCommand::Credit {
                account: required(record.account, "account")?,
                amount: required(record.amount, "amount")?,
            }),
            "debit" => Ok(OpCommand::Debit {
                account: required(record.account, "account")?,
                amount: required(record.amount, "amount")?,
            }),
            "transfer" => Ok(OpCommand::Transfer {
                from: required(record.account, "account")?,
                to: required(record.to, "to")?,
                amount: required(record.amount, "amount")?,
            }),
            "accrue_bonus" => Ok(OpCommand::AccrueBonus {
                account: required(record.account, "account")?,
            }),
            "accrue_interest" => Ok(OpCommand::AccrueInterest {
                account: required(record.account, "account")?,
            }),
            other => Err(anyhow!("unknown operation {:?}", other)),
        }
    }
}
