use std::collections::HashMap;
use std::convert::TryFrom;
use std::io;

use anyhow::Result;
use clap::Parser;
use rust_decimal::prelude::*;
use serde::Serialize;
use tracing::{debug, error};

use backoffice::accounts::{Account, AccountKind};
use backoffice::bank::{Bank, BankError, UpdatePolicy};
use backoffice::clients::Client;
use backoffice::commands::{OpCommand, OpRecord};
use backoffice::repository::{MemoryRepo, Repository};

#[derive(Parser)]
#[clap(version = "0.1.0")]
struct Opts {
    /// CSV file of back-office operations
    file: String,
    /// Tolerate rejected account updates instead of failing the operation
    #[clap(long)]
    lenient: bool,
}

#[derive(Debug, Serialize)]
struct AccountStatement {
    number: String,
    kind: AccountKind,
    balance: Decimal,
    client: Option<String>,
}

fn apply(bank: &Bank, command: &OpCommand) -> Result<()> {
    match command {
        OpCommand::RegisterClient { id, name } => {
            bank.register_client(Client::new(id.clone(), name.clone()))
        }
        OpCommand::RegisterAccount {
            number,
            kind,
            balance,
        } => bank.register_account(Account::new(number.clone(), *kind, *balance)),
        OpCommand::Associate { client, account } => bank.associate(client, account),
        OpCommand::RemoveClient { id } => bank.remove_client(id),
        OpCommand::RemoveAccount { client, account } => {
            let mut client = bank
                .find_client(client)?
                .ok_or(BankError::ClientNotRegistered)?;
            bank.remove_account(&mut client, account)
        }
        OpCommand::Credit { account, amount } => {
            let mut acc = bank
                .find_account(account)?
                .ok_or(BankError::AccountNotFound)?;
            bank.credit(&mut acc, *amount)
        }
        OpCommand::Debit { account, amount } => {
            let mut acc = bank
                .find_account(account)?
                .ok_or(BankError::AccountNotFound)?;
            bank.debit(&mut acc, *amount)
        }
        OpCommand::Transfer { from, to, amount } => {
            let mut source = bank
                .find_account(from)?
                .ok_or(BankError::AccountNotFound)?;
            let mut destination = bank.find_account(to)?.ok_or(BankError::AccountNotFound)?;
            bank.transfer(&mut source, &mut destination, *amount)
        }
        OpCommand::AccrueBonus { account } => {
            let mut acc = bank
                .find_account(account)?
                .ok_or(BankError::AccountNotFound)?;
            bank.accrue_bonus(&mut acc)
        }
        OpCommand::AccrueInterest { account } => {
            let mut acc = bank
                .find_account(account)?
                .ok_or(BankError::AccountNotFound)?;
            bank.accrue_interest(&mut acc)
        }
    }
}

fn run() -> Result<()> {
    let opts: Opts = Opts::parse();

    let mut reader = csv::Reader::from_path(opts.file)?;
    let clients: MemoryRepo<Client> = MemoryRepo::new();
    let accounts: MemoryRepo<Account> = MemoryRepo::new();
    let policy = if opts.lenient {
        UpdatePolicy::Lenient
    } else {
        UpdatePolicy::Strict
    };
    let bank = Bank::new(&clients, &accounts, policy);

    for result in reader.deserialize() {
        let record: OpRecord = result?;
        let command = match OpCommand::try_from(record) {
            Ok(command) => command,
            Err(e) => {
                error!(error = e.to_string().as_str(), "Unreadable operation");
                continue;
            }
        };
        match apply(&bank, &command) {
            Ok(()) => debug!(?command, "Applied operation"),
            Err(e) => error!(
                error = e.to_string().as_str(),
                ?command,
                "Unable to apply operation"
            ),
        }
    }

    let mut owners: HashMap<String, String> = HashMap::new();
    for client in clients.get_all()? {
        for number in client.accounts() {
            owners.insert(number.clone(), client.id().to_owned());
        }
    }

    let mut statement = accounts.get_all()?;
    statement.sort_by(|a, b| a.number().cmp(b.number()));

    let mut writer = csv::Writer::from_writer(io::stdout());
    for acc in statement {
        writer.serialize(AccountStatement {
            number: acc.number().to_owned(),
            kind: acc.kind(),
            balance: acc.balance(),
            client: owners.get(acc.number()).cloned(),
        })?;
    }
    writer.flush()?;

    Ok(())
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run() {
        error!(error = e.to_string().as_str(), "Something went wrong")
    }
}
