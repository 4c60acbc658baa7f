use soroban_sdk::{contract, contractimpl, log, panic_with_error, token, Address, Bytes, Env, Vec};

use crate::confirmation::ConfirmationEngine;
use crate::errors::WalletError;
use crate::events::FundsDeposited;
use crate::execution::ExecutionEngine;
use crate::identity::IdentityGate;
use crate::ledger::{extend_instance_ttl, TransactionLedger};
use crate::types::{DataKey, Transaction, WalletConfig};

#[contract]
pub struct MultiSigWallet;

#[contractimpl]
impl MultiSigWallet {
    /// Fixes the owner set, the confirmation threshold, the asset held by the
    /// wallet and its policy switches. Runs once, as part of deployment.
    ///
    /// # Panics
    /// * `EmptyOwnerList` - If `owners` is empty
    /// * `InvalidThreshold` - If `required` is zero
    /// * `ThresholdExceedsOwners` - If `required` is larger than the owner set
    /// * `DuplicateOwner` - If an owner appears twice
    pub fn __constructor(
        env: Env,
        owners: Vec<Address>,
        required: u32,
        token: Address,
        config: WalletConfig,
    ) {
        if let Err(err) = IdentityGate::register(&env, &owners, required) {
            panic_with_error!(&env, err);
        }

        let storage = env.storage().instance();
        storage.set(&DataKey::Token, &token);
        storage.set(&DataKey::Config, &config);
        storage.set(&DataKey::TransactionCount, &0u64);
        extend_instance_ttl(&env);

        log!(&env, "wallet created", owners.len(), required);
    }

    /// Moves `amount` of the wallet's token from `from` into the wallet.
    /// Anyone may deposit. Plain token transfers to the wallet address count
    /// towards the balance as well.
    pub fn deposit(env: Env, from: Address, amount: i128) -> Result<(), WalletError> {
        from.require_auth();
        extend_instance_ttl(&env);

        if amount < 0 {
            return Err(WalletError::InvalidAmount);
        }

        if amount > 0 {
            let client = token::Client::new(&env, &ExecutionEngine::token(&env)?);
            if !matches!(
                client.try_transfer(&from, &env.current_contract_address(), &amount),
                Ok(Ok(()))
            ) {
                return Err(WalletError::TransferFailed);
            }
        }

        FundsDeposited { from, amount }.publish(&env);
        log!(&env, "funds deposited", amount);
        Ok(())
    }

    /// Proposes a transfer of `value` to `destination`, forwarding `data` on
    /// execution. Returns the new transaction id.
    ///
    /// # Errors
    /// * `Unauthorized` - If `caller` is not an owner
    /// * `InvalidAmount` - If `value` is negative
    pub fn submit_transaction(
        env: Env,
        caller: Address,
        destination: Address,
        value: i128,
        data: Bytes,
    ) -> Result<u64, WalletError> {
        IdentityGate::require_owner(&env, &caller)?;
        extend_instance_ttl(&env);

        let id = TransactionLedger::append(&env, &caller, destination, value, data)?;
        if Self::load_config(&env)?.confirm_on_submit {
            Self::confirm_and_settle(&env, id, &caller)?;
        }
        Ok(id)
    }

    /// Records the caller's approval of transaction `id`. Confirming twice
    /// is accepted and counted once.
    ///
    /// # Errors
    /// * `Unauthorized` - If `caller` is not an owner
    /// * `NotFound` - If `id` was never submitted
    /// * `AlreadyExecuted` - If the transaction has been executed
    /// * `TransferFailed` - If auto-execution ran and the payout was rejected
    pub fn confirm_transaction(env: Env, caller: Address, id: u64) -> Result<(), WalletError> {
        IdentityGate::require_owner(&env, &caller)?;
        extend_instance_ttl(&env);
        Self::confirm_and_settle(&env, id, &caller)
    }

    /// Withdraws the caller's approval of transaction `id`.
    ///
    /// # Errors
    /// * `Unauthorized` - If `caller` is not an owner
    /// * `NotFound` - If `id` was never submitted
    /// * `AlreadyExecuted` - If the transaction has been executed
    pub fn revoke_confirmation(env: Env, caller: Address, id: u64) -> Result<(), WalletError> {
        IdentityGate::require_owner(&env, &caller)?;
        extend_instance_ttl(&env);
        ConfirmationEngine::revoke(&env, id, &caller)?;
        Ok(())
    }

    /// Pays out transaction `id` once it has enough confirmations.
    ///
    /// # Errors
    /// * `Unauthorized` - If `caller` is not an owner
    /// * `NotFound` - If `id` was never submitted
    /// * `AlreadyExecuted` - If the transaction has been executed
    /// * `InsufficientConfirmations` - If fewer than `required` owners confirmed
    /// * `InsufficientFunds` - If the wallet balance is below the value
    /// * `TransferFailed` - If the destination rejected the payout
    pub fn execute_transaction(env: Env, caller: Address, id: u64) -> Result<(), WalletError> {
        IdentityGate::require_owner(&env, &caller)?;
        extend_instance_ttl(&env);
        ExecutionEngine::execute(&env, id, &caller)?;
        Ok(())
    }

    pub fn get_owners(env: Env) -> Result<Vec<Address>, WalletError> {
        IdentityGate::owners(&env)
    }

    pub fn is_owner(env: Env, address: Address) -> bool {
        IdentityGate::is_owner(&env, &address)
    }

    pub fn required(env: Env) -> Result<u32, WalletError> {
        IdentityGate::required(&env)
    }

    pub fn config(env: Env) -> Result<WalletConfig, WalletError> {
        Self::load_config(&env)
    }

    pub fn token(env: Env) -> Result<Address, WalletError> {
        ExecutionEngine::token(&env)
    }

    pub fn balance(env: Env) -> Result<i128, WalletError> {
        ExecutionEngine::balance(&env)
    }

    pub fn transaction_count(env: Env) -> u64 {
        TransactionLedger::count(&env)
    }

    pub fn get_transaction(env: Env, id: u64) -> Result<Transaction, WalletError> {
        TransactionLedger::get(&env, id)
    }

    pub fn get_confirmation_count(env: Env, id: u64) -> Result<u32, WalletError> {
        ConfirmationEngine::count(&env, id)
    }

    pub fn get_confirmations(env: Env, id: u64) -> Result<Vec<Address>, WalletError> {
        ConfirmationEngine::confirmed_by(&env, id)
    }

    pub fn is_confirmed_by(env: Env, id: u64, owner: Address) -> Result<bool, WalletError> {
        ConfirmationEngine::has_confirmed(&env, id, &owner)
    }

    /// True once at least `required` owners have confirmed `id`.
    pub fn is_confirmed(env: Env, id: u64) -> Result<bool, WalletError> {
        Ok(ConfirmationEngine::count(&env, id)? >= IdentityGate::required(&env)?)
    }

    pub fn pending_transactions(env: Env) -> Vec<u64> {
        TransactionLedger::pending(&env)
    }

    fn load_config(env: &Env) -> Result<WalletConfig, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(WalletError::NotInitialized)
    }

    /// Confirms for `owner` and, under `auto_execute`, pays out as soon as the
    /// transaction is both confirmed and funded. An unfunded transaction stays
    /// pending with the confirmation kept.
    fn confirm_and_settle(env: &Env, id: u64, owner: &Address) -> Result<(), WalletError> {
        ConfirmationEngine::confirm(env, id, owner)?;
        if Self::load_config(env)?.auto_execute && ExecutionEngine::is_ready(env, id)? {
            ExecutionEngine::execute(env, id, owner)?;
        }
        Ok(())
    }
}
