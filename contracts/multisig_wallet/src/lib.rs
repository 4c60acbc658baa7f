#![no_std]

mod confirmation;
mod errors;
mod events;
mod execution;
mod identity;
mod ledger;
mod types;
mod wallet;

pub use errors::WalletError;
pub use events::{
    ConfirmationRevoked, FundsDeposited, TransactionConfirmed, TransactionExecuted,
    TransactionSubmitted,
};
pub use types::{Confirmation, Transaction, WalletConfig};
pub use wallet::{MultiSigWallet, MultiSigWalletClient};
