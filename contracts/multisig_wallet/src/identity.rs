use soroban_sdk::{Address, Env, Vec};

use crate::errors::WalletError;
use crate::types::DataKey;

/// Owner membership for the wallet. The owner set and threshold are written
/// once by `register` and never change afterwards.
pub struct IdentityGate;

impl IdentityGate {
    pub fn register(env: &Env, owners: &Vec<Address>, required: u32) -> Result<(), WalletError> {
        if owners.is_empty() {
            return Err(WalletError::EmptyOwnerList);
        }

        if required == 0 {
            return Err(WalletError::InvalidThreshold);
        }

        if required > owners.len() {
            return Err(WalletError::ThresholdExceedsOwners);
        }

        for i in 0..owners.len() {
            for j in (i + 1)..owners.len() {
                if owners.get_unchecked(i) == owners.get_unchecked(j) {
                    return Err(WalletError::DuplicateOwner);
                }
            }
        }

        let storage = env.storage().instance();
        for owner in owners.iter() {
            storage.set(&DataKey::Owner(owner), &true);
        }
        storage.set(&DataKey::Owners, owners);
        storage.set(&DataKey::Required, &required);

        Ok(())
    }

    pub fn is_owner(env: &Env, caller: &Address) -> bool {
        env.storage().instance().has(&DataKey::Owner(caller.clone()))
    }

    /// Has the host authenticate `caller`, then checks that it is an owner.
    pub fn require_owner(env: &Env, caller: &Address) -> Result<(), WalletError> {
        caller.require_auth();
        if !Self::is_owner(env, caller) {
            return Err(WalletError::Unauthorized);
        }
        Ok(())
    }

    pub fn owners(env: &Env) -> Result<Vec<Address>, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::Owners)
            .ok_or(WalletError::NotInitialized)
    }

    pub fn required(env: &Env) -> Result<u32, WalletError> {
        env.storage()
            .instance()
            .get(&DataKey::Required)
            .ok_or(WalletError::NotInitialized)
    }
}
