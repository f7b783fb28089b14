//! LMDB implementation of TokenStore.

use heed::RoTxn;
use slp_store::token::TokenStore;
use slp_store::StoreError;
use slp_types::{AccountId, TokenMetadata};

use crate::meta::TOKEN_METADATA_KEY;
use crate::{LmdbEnvironment, LmdbError};

pub(crate) const TOTAL_SUPPLY_KEY: &[u8] = b"total_supply";
pub(crate) const OWNER_KEY: &[u8] = b"owner";

pub(crate) fn decode_u128(bytes: &[u8], what: &str) -> Result<u128, LmdbError> {
    let arr: [u8; 16] = bytes
        .try_into()
        .map_err(|_| LmdbError::Corrupt(format!("{} has unexpected byte length", what)))?;
    Ok(u128::from_le_bytes(arr))
}

pub(crate) fn decode_account(bytes: &[u8]) -> Result<AccountId, LmdbError> {
    AccountId::from_slice(bytes)
        .ok_or_else(|| LmdbError::Corrupt(format!("account key of {} bytes", bytes.len())))
}

impl LmdbEnvironment {
    pub(crate) fn read_metadata(
        &self,
        rtxn: &RoTxn<'_>,
    ) -> Result<Option<TokenMetadata>, LmdbError> {
        match self.meta_db.get(rtxn, TOKEN_METADATA_KEY)? {
            Some(bytes) => Ok(Some(bincode::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn read_total_supply(&self, rtxn: &RoTxn<'_>) -> Result<u128, LmdbError> {
        match self.state_db.get(rtxn, TOTAL_SUPPLY_KEY)? {
            Some(bytes) => decode_u128(bytes, "total_supply"),
            None => Ok(0),
        }
    }

    pub(crate) fn read_owner(&self, rtxn: &RoTxn<'_>) -> Result<Option<AccountId>, LmdbError> {
        match self.state_db.get(rtxn, OWNER_KEY)? {
            Some(bytes) => Ok(Some(decode_account(bytes)?)),
            None => Ok(None),
        }
    }

    pub(crate) fn read_balances(
        &self,
        rtxn: &RoTxn<'_>,
    ) -> Result<Vec<(AccountId, u128)>, LmdbError> {
        let mut out = Vec::new();
        for item in self.balances_db.iter(rtxn)? {
            let (key, value) = item?;
            out.push((decode_account(key)?, decode_u128(value, "balance")?));
        }
        Ok(out)
    }
}

impl TokenStore for LmdbEnvironment {
    fn get_metadata(&self) -> Result<Option<TokenMetadata>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_metadata(&rtxn)?)
    }

    fn get_total_supply(&self) -> Result<u128, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_total_supply(&rtxn)?)
    }

    fn get_owner(&self) -> Result<Option<AccountId>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_owner(&rtxn)?)
    }

    fn get_balance(&self, account: &AccountId) -> Result<u128, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .balances_db
            .get(&rtxn, account.as_bytes())
            .map_err(LmdbError::from)?
        {
            Some(bytes) => Ok(decode_u128(bytes, "balance")?),
            None => Ok(0),
        }
    }

    fn iter_balances(&self) -> Result<Vec<(AccountId, u128)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.read_balances(&rtxn)?)
    }

    fn holder_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        Ok(self.balances_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
