//! `dsmc-balance` — keeps parcel counts even across mesh partitions.
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`balancer`]  | `LoadBalancer` — interval checks, imbalance metric      |
//! | [`partitioner`] | `Partitioner` barrier contract, `SinglePartition`     |
//! | [`error`]     | `BalanceError`, `BalanceResult<T>`                      |
//!
//! A repartition invalidates every cell ID on every worker: the caller owns
//! the follow-up occupancy rebuild, signalled by
//! [`BalanceOutcome::Repartitioned`].

pub mod balancer;
pub mod error;
pub mod partitioner;

#[cfg(test)]
mod tests;

pub use balancer::{BalanceConfig, BalanceOutcome, LoadBalancer};
pub use error::{BalanceError, BalanceResult};
pub use partitioner::{Partitioner, SinglePartition};
