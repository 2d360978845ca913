use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::repository::Keyed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: String,
    name: String,
    accounts: BTreeSet<String>,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Client {
        Client {
            id: id.into(),
            name: name.into(),
            accounts: BTreeSet::new(),
        }
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn accounts(&self) -> &BTreeSet<String> {
        &self.accounts
    }
    pub fn add_account(&mut self, number: &str) {
        self.accounts.insert(number.to_owned());
    }
    pub fn remove_account(&mut self, number: &str) -> bool {
        self.accounts.remove(number)
    }
    pub fn has_account(&self, number: &str) -> bool {
        self.accounts.contains(number)
    }
}

impl Keyed for Client {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_set() {
        let mut client = Client::new("123", "João");
        assert!(!client.has_account("1"));

        client.add_account("1");
        client.add_account("2");
        // adding twice keeps a single entry
        client.add_account("1");
        assert!(client.has_account("1"));
        assert_eq!(client.accounts().len(), 2);

        assert!(client.remove_account("1"));
        assert!(!client.remove_account("1"));
        assert!(!client.has_account("1"));
    }
}
