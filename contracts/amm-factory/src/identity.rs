//! Deterministic pool identity.
//!
//! A pool and its share token are deployed by the factory at addresses
//! derived from the asset pair alone, so anyone can compute where the pool
//! for a pair lives without reading factory storage. Swapping this scheme
//! out only touches this module.

use soroban_sdk::{xdr::ToXdr, Address, Bytes, BytesN, Env};

/// Domain tags keep the pool and share salts of one pair distinct
const POOL_TAG: u8 = 0x01;
const SHARE_TAG: u8 = 0x02;

/// Deployment salts for one asset pair
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolIdentity {
    pub pool_salt: BytesN<32>,
    pub share_salt: BytesN<32>,
}

/// Derive the salts for a sorted pair
///
/// salt = sha256(tag || xdr(asset0) || xdr(asset1))
pub fn derive(env: &Env, asset0: &Address, asset1: &Address) -> PoolIdentity {
    PoolIdentity {
        pool_salt: salt(env, POOL_TAG, asset0, asset1),
        share_salt: salt(env, SHARE_TAG, asset0, asset1),
    }
}

/// Address the pool for this identity has (or will have) under the
/// current contract as deployer
pub fn pool_address(env: &Env, identity: &PoolIdentity) -> Address {
    env.deployer()
        .with_current_contract(identity.pool_salt.clone())
        .deployed_address()
}

fn salt(env: &Env, tag: u8, asset0: &Address, asset1: &Address) -> BytesN<32> {
    let mut preimage = Bytes::new(env);
    preimage.push_back(tag);
    preimage.append(&asset0.clone().to_xdr(env));
    preimage.append(&asset1.clone().to_xdr(env));
    env.crypto().sha256(&preimage).to_bytes()
}
