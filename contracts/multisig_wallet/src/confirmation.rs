use soroban_sdk::{log, Address, Env, Vec};

use crate::errors::WalletError;
use crate::events::{ConfirmationRevoked, TransactionConfirmed};
use crate::identity::IdentityGate;
use crate::ledger::{TransactionLedger, TTL_EXTEND_TO, TTL_THRESHOLD};
use crate::types::{Confirmation, DataKey};

/// Per-owner approvals of submitted transactions. Each owner appears at most
/// once per transaction, so the stored list length is the confirmation count.
pub struct ConfirmationEngine;

impl ConfirmationEngine {
    /// Records `owner`'s approval and returns the resulting count. Confirming
    /// twice succeeds without counting twice.
    pub fn confirm(env: &Env, id: u64, owner: &Address) -> Result<u32, WalletError> {
        Self::require_open(env, id, owner)?;

        let mut confirmations = Self::load(env, id);
        if Self::position(&confirmations, owner).is_some() {
            return Ok(confirmations.len());
        }

        confirmations.push_back(Confirmation {
            owner: owner.clone(),
            confirmed_at: env.ledger().timestamp(),
        });
        Self::store(env, id, &confirmations);

        let count = confirmations.len();
        TransactionConfirmed {
            id,
            owner: owner.clone(),
            confirmations: count,
        }
        .publish(env);
        log!(env, "transaction confirmed", id, count);

        Ok(count)
    }

    /// Withdraws `owner`'s approval and returns the resulting count. Revoking
    /// an approval that was never given succeeds and changes nothing.
    pub fn revoke(env: &Env, id: u64, owner: &Address) -> Result<u32, WalletError> {
        Self::require_open(env, id, owner)?;

        let mut confirmations = Self::load(env, id);
        let Some(index) = Self::position(&confirmations, owner) else {
            return Ok(confirmations.len());
        };

        confirmations.remove(index);
        Self::store(env, id, &confirmations);

        let count = confirmations.len();
        ConfirmationRevoked {
            id,
            owner: owner.clone(),
            confirmations: count,
        }
        .publish(env);
        log!(env, "confirmation revoked", id, count);

        Ok(count)
    }

    pub fn count(env: &Env, id: u64) -> Result<u32, WalletError> {
        TransactionLedger::get(env, id)?;
        Ok(Self::load(env, id).len())
    }

    pub fn confirmed_by(env: &Env, id: u64) -> Result<Vec<Address>, WalletError> {
        TransactionLedger::get(env, id)?;
        let mut owners = Vec::new(env);
        for confirmation in Self::load(env, id).iter() {
            owners.push_back(confirmation.owner);
        }
        Ok(owners)
    }

    pub fn has_confirmed(env: &Env, id: u64, owner: &Address) -> Result<bool, WalletError> {
        TransactionLedger::get(env, id)?;
        Ok(Self::position(&Self::load(env, id), owner).is_some())
    }

    fn require_open(env: &Env, id: u64, owner: &Address) -> Result<(), WalletError> {
        if !IdentityGate::is_owner(env, owner) {
            return Err(WalletError::Unauthorized);
        }
        if TransactionLedger::get(env, id)?.executed {
            return Err(WalletError::AlreadyExecuted);
        }
        Ok(())
    }

    fn position(confirmations: &Vec<Confirmation>, owner: &Address) -> Option<u32> {
        confirmations
            .iter()
            .position(|confirmation| confirmation.owner == *owner)
            .map(|index| index as u32)
    }

    fn load(env: &Env, id: u64) -> Vec<Confirmation> {
        env.storage()
            .persistent()
            .get(&DataKey::Confirmations(id))
            .unwrap_or(Vec::new(env))
    }

    fn store(env: &Env, id: u64, confirmations: &Vec<Confirmation>) {
        let key = DataKey::Confirmations(id);
        env.storage().persistent().set(&key, confirmations);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}
