//! The distributed-coordination seam of the load balancer.

use dsmc_core::PartitionId;

use crate::BalanceResult;

/// Coordinates the parallel workers during a balance check.
///
/// Both methods are synchronous barriers: every worker calls them at the
/// same point of the same step, and no worker proceeds until all have
/// returned.  A partial repartition is impossible by contract — an
/// implementation that cannot complete one must return an error, which the
/// caller treats as fatal.
pub trait Partitioner {
    /// Number of partitions in the run.
    fn partition_count(&self) -> usize;

    /// The partition this worker owns.
    fn local_partition(&self) -> PartitionId;

    /// Exchange per-partition parcel counts; entry `i` is partition `i`'s
    /// count.  Barrier.
    fn gather_counts(&mut self, local_count: usize) -> BalanceResult<Vec<usize>>;

    /// Recompute the mesh decomposition from the gathered counts and migrate
    /// parcels to their new owners.  Barrier; cell IDs are invalid afterwards
    /// and the caller must rebuild the occupancy index from scratch.
    fn repartition(&mut self, counts: &[usize]) -> BalanceResult<()>;
}

/// The serial "decomposition": one partition owning everything.
///
/// Gathering returns the local count and repartitioning is a no-op, which
/// lets single-process runs share the balancer code path unchanged.
pub struct SinglePartition;

impl Partitioner for SinglePartition {
    fn partition_count(&self) -> usize {
        1
    }

    fn local_partition(&self) -> PartitionId {
        PartitionId(0)
    }

    fn gather_counts(&mut self, local_count: usize) -> BalanceResult<Vec<usize>> {
        Ok(vec![local_count])
    }

    fn repartition(&mut self, _counts: &[usize]) -> BalanceResult<()> {
        Ok(())
    }
}
