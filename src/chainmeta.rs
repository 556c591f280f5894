//! Chain metadata snapshot model.

use crate::client::FetchError;
use crate::proto;

/// One immutable chain-metadata snapshot. Created at fetch time, consumed
/// to produce samples, then discarded; nothing is cached across scrapes.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainMetaSnapshot {
    /// Current chain height.
    pub height: u64,

    /// Count of actions observed on the chain.
    pub num_actions: u64,

    /// Throughput, transactions per second (integer measure).
    pub tps: u64,

    /// Throughput, transactions per second (fractional measure).
    pub tps_float: f64,

    /// Current epoch.
    pub epoch: EpochMeta,
}

/// Epoch position within the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochMeta {
    /// Epoch index.
    pub num: u64,

    /// Height at which the epoch started.
    pub height: u64,

    /// Anchor height into the external gravity chain.
    pub gravity_chain_start_height: u64,
}

impl TryFrom<proto::GetChainMetaResponse> for ChainMetaSnapshot {
    type Error = FetchError;

    fn try_from(response: proto::GetChainMetaResponse) -> Result<Self, Self::Error> {
        let meta = response
            .chain_meta
            .ok_or(FetchError::Malformed("response carries no chain metadata"))?;
        let epoch = meta
            .epoch
            .ok_or(FetchError::Malformed("chain metadata carries no epoch"))?;

        Ok(Self {
            height: meta.height,
            num_actions: meta.num_actions,
            tps: meta.tps,
            // Wire type is a proto float; widening to f64 is lossless.
            tps_float: f64::from(meta.tps_float),
            epoch: EpochMeta {
                num: epoch.num,
                height: epoch.height,
                gravity_chain_start_height: epoch.gravity_chain_start_height,
            },
        })
    }
}
