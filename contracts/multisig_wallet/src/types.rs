use soroban_sdk::{contracttype, Address, Bytes};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owners,
    Owner(Address),
    Required,
    Token,
    Config,
    TransactionCount,
    Transaction(u64),
    Confirmations(u64),
    PendingTransactions,
}

/// Policy switches fixed at deployment.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WalletConfig {
    /// Record the submitter's confirmation as part of `submit_transaction`.
    pub confirm_on_submit: bool,
    /// Execute from `confirm_transaction` once the threshold is reached and
    /// the balance covers the value.
    pub auto_execute: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transaction {
    pub id: u64,
    pub submitter: Address,
    pub destination: Address,
    pub value: i128,
    pub data: Bytes,
    pub submitted_at: u64,
    pub executed: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Confirmation {
    pub owner: Address,
    pub confirmed_at: u64,
}
