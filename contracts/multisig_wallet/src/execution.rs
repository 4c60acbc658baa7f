use soroban_sdk::{log, token, Address, Env, IntoVal, Symbol, Val, Vec};

use crate::confirmation::ConfirmationEngine;
use crate::errors::WalletError;
use crate::events::TransactionExecuted;
use crate::identity::IdentityGate;
use crate::ledger::TransactionLedger;
use crate::types::{DataKey, Transaction};

const PAYMENT_HOOK: &str = "on_payment";

/// Threshold evaluation and at-most-once payout.
pub struct ExecutionEngine;

impl ExecutionEngine {
    /// Runs the precondition checks in order, then marks the transaction
    /// executed before paying out. A rejected payout restores the record and
    /// surfaces as `TransferFailed`.
    pub fn execute(env: &Env, id: u64, caller: &Address) -> Result<Transaction, WalletError> {
        if !IdentityGate::is_owner(env, caller) {
            return Err(WalletError::Unauthorized);
        }

        let transaction = TransactionLedger::get(env, id)?;
        if transaction.executed {
            return Err(WalletError::AlreadyExecuted);
        }

        let required = IdentityGate::required(env)?;
        if ConfirmationEngine::count(env, id)? < required {
            return Err(WalletError::InsufficientConfirmations);
        }

        let token = Self::token(env)?;
        if Self::balance_of(env, &token) < transaction.value {
            return Err(WalletError::InsufficientFunds);
        }

        let executed = TransactionLedger::mark_executed(env, id)?;
        if let Err(err) = Self::pay_out(env, &token, &executed) {
            // The host discards any token movement already made once this
            // error reaches the entry point.
            TransactionLedger::restore(env, &transaction);
            log!(env, "payout rejected", id);
            return Err(err);
        }

        TransactionExecuted {
            id,
            executor: caller.clone(),
            destination: executed.destination.clone(),
            value: executed.value,
        }
        .publish(env);
        log!(env, "transaction executed", id, executed.value);

        Ok(executed)
    }

    /// True when `id` has reached threshold and the wallet holds enough to pay it.
    pub fn is_ready(env: &Env, id: u64) -> Result<bool, WalletError> {
        let transaction = TransactionLedger::get(env, id)?;
        if transaction.executed {
            return Ok(false);
        }
        let confirmed = ConfirmationEngine::count(env, id)? >= IdentityGate::required(env)?;
        Ok(confirmed && Self::balance(env)? >= transaction.value)
    }

    pub fn balance(env: &Env) -> Result<i128, WalletError> {
        let token = Self::token(env)?;
        Ok(Self::balance_of(env, &token))
    }

    pub fn token(env: &Env) -> Result<Address, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(WalletError::NotInitialized)
    }

    fn balance_of(env: &Env, token: &Address) -> i128 {
        token::Client::new(env, token).balance(&env.current_contract_address())
    }

    fn pay_out(env: &Env, token: &Address, transaction: &Transaction) -> Result<(), WalletError> {
        let wallet = env.current_contract_address();

        if transaction.value > 0 {
            let client = token::Client::new(env, token);
            if !matches!(
                client.try_transfer(&wallet, &transaction.destination, &transaction.value),
                Ok(Ok(()))
            ) {
                return Err(WalletError::TransferFailed);
            }
        }

        if !transaction.data.is_empty() {
            let args: Vec<Val> = (
                wallet,
                transaction.id,
                transaction.value,
                transaction.data.clone(),
            )
                .into_val(env);
            let result = env.try_invoke_contract::<(), WalletError>(
                &transaction.destination,
                &Symbol::new(env, PAYMENT_HOOK),
                args,
            );
            if !matches!(result, Ok(Ok(()))) {
                return Err(WalletError::TransferFailed);
            }
        }

        Ok(())
    }
}
