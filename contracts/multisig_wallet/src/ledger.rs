use soroban_sdk::{log, Address, Bytes, Env, Vec};

use crate::errors::WalletError;
use crate::events::TransactionSubmitted;
use crate::types::{Confirmation, DataKey, Transaction};

pub(crate) const TTL_THRESHOLD: u32 = 100;
pub(crate) const TTL_EXTEND_TO: u32 = 2_000_000;

/// Keeps the wallet's instance entry (owners, threshold, token, config) alive.
pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Append-only record of submitted transactions. Ids are dense and start at 0.
/// Unexecuted ids are also kept in a sorted index so listing them does not
/// walk the whole ledger.
pub struct TransactionLedger;

impl TransactionLedger {
    pub fn count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TransactionCount)
            .unwrap_or(0u64)
    }

    pub fn append(
        env: &Env,
        submitter: &Address,
        destination: Address,
        value: i128,
        data: Bytes,
    ) -> Result<u64, WalletError> {
        if value < 0 {
            return Err(WalletError::InvalidAmount);
        }

        let id = Self::count(env);
        let transaction = Transaction {
            id,
            submitter: submitter.clone(),
            destination: destination.clone(),
            value,
            data: data.clone(),
            submitted_at: env.ledger().timestamp(),
            executed: false,
        };
        Self::save(env, &transaction);

        let key = DataKey::Confirmations(id);
        env.storage()
            .persistent()
            .set(&key, &Vec::<Confirmation>::new(env));
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

        env.storage()
            .instance()
            .set(&DataKey::TransactionCount, &(id + 1));

        let mut pending = Self::pending(env);
        pending.push_back(id);
        Self::store_pending(env, &pending);

        TransactionSubmitted {
            id,
            destination,
            value,
            data,
        }
        .publish(env);
        log!(env, "transaction submitted", id, value);

        Ok(id)
    }

    pub fn get(env: &Env, id: u64) -> Result<Transaction, WalletError> {
        env.storage()
            .persistent()
            .get(&DataKey::Transaction(id))
            .ok_or(WalletError::NotFound)
    }

    /// Flips `executed` and returns the updated record. This is the only
    /// place the flag is set.
    pub fn mark_executed(env: &Env, id: u64) -> Result<Transaction, WalletError> {
        let mut transaction = Self::get(env, id)?;
        if transaction.executed {
            return Err(WalletError::AlreadyExecuted);
        }
        transaction.executed = true;
        Self::save(env, &transaction);

        let mut pending = Self::pending(env);
        if let Ok(index) = pending.binary_search(id) {
            pending.remove(index);
            Self::store_pending(env, &pending);
        }

        Ok(transaction)
    }

    /// Writes back a record captured before `mark_executed` after a failed payout.
    pub fn restore(env: &Env, transaction: &Transaction) {
        Self::save(env, transaction);

        if !transaction.executed {
            let mut pending = Self::pending(env);
            if let Err(index) = pending.binary_search(transaction.id) {
                pending.insert(index, transaction.id);
                Self::store_pending(env, &pending);
            }
        }
    }

    /// Ids of transactions not yet executed, in submission order.
    pub fn pending(env: &Env) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::PendingTransactions)
            .unwrap_or(Vec::new(env))
    }

    fn store_pending(env: &Env, pending: &Vec<u64>) {
        let key = DataKey::PendingTransactions;
        env.storage().persistent().set(&key, pending);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    fn save(env: &Env, transaction: &Transaction) {
        let key = DataKey::Transaction(transaction.id);
        env.storage().persistent().set(&key, transaction);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
