use dsmc_core::PartitionId;

use crate::{
    BalanceConfig, BalanceError, BalanceOutcome, BalanceResult, LoadBalancer, Partitioner,
    SinglePartition,
};

/// A scripted multi-worker view: counts are injected per check and
/// repartitions are recorded.
struct ScriptedPartitioner {
    counts:        Vec<usize>,
    repartitions:  usize,
    broken_gather: bool,
}

impl ScriptedPartitioner {
    fn new(counts: Vec<usize>) -> Self {
        Self { counts, repartitions: 0, broken_gather: false }
    }
}

impl Partitioner for ScriptedPartitioner {
    fn partition_count(&self) -> usize {
        self.counts.len()
    }

    fn local_partition(&self) -> PartitionId {
        PartitionId(0)
    }

    fn gather_counts(&mut self, local_count: usize) -> BalanceResult<Vec<usize>> {
        self.counts[0] = local_count;
        if self.broken_gather {
            // One worker short, as if a gather message went missing.
            Ok(self.counts[1..].to_vec())
        } else {
            Ok(self.counts.clone())
        }
    }

    fn repartition(&mut self, counts: &[usize]) -> BalanceResult<()> {
        self.repartitions += 1;
        // Perfectly even split after the repartition.
        let mean = counts.iter().sum::<usize>() / counts.len();
        self.counts = vec![mean; counts.len()];
        Ok(())
    }
}

#[test]
fn imbalance_is_max_over_mean() {
    assert_eq!(LoadBalancer::imbalance(&[100, 100, 100, 100]), 1.0);
    assert_eq!(LoadBalancer::imbalance(&[200, 100, 100, 0]), 2.0);
    // Empty and all-zero inputs count as balanced.
    assert_eq!(LoadBalancer::imbalance(&[]), 1.0);
    assert_eq!(LoadBalancer::imbalance(&[0, 0]), 1.0);
}

#[test]
fn check_only_fires_on_the_interval() {
    let mut balancer =
        LoadBalancer::new(BalanceConfig { interval_steps: 3, imbalance_threshold: 1.25 });
    let mut partitioner = ScriptedPartitioner::new(vec![100, 100]);

    assert_eq!(balancer.step(&mut partitioner, 100, false).unwrap(), BalanceOutcome::NotDue);
    assert_eq!(balancer.step(&mut partitioner, 100, false).unwrap(), BalanceOutcome::NotDue);
    assert!(matches!(
        balancer.step(&mut partitioner, 100, false).unwrap(),
        BalanceOutcome::Balanced { .. }
    ));
    // Counter restarts after a check.
    assert_eq!(balancer.step(&mut partitioner, 100, false).unwrap(), BalanceOutcome::NotDue);
}

#[test]
fn threshold_breach_triggers_repartition() {
    let mut balancer =
        LoadBalancer::new(BalanceConfig { interval_steps: 1, imbalance_threshold: 1.25 });
    let mut partitioner = ScriptedPartitioner::new(vec![0, 100, 100, 100]);

    // Local worker holds 700 of 1000 parcels: imbalance 2.8.
    let outcome = balancer.step(&mut partitioner, 700, false).unwrap();
    assert!(matches!(outcome, BalanceOutcome::Repartitioned { imbalance } if imbalance > 2.0));
    assert_eq!(partitioner.repartitions, 1);

    // After the even split the next check stays quiet.
    let outcome = balancer.step(&mut partitioner, 250, false).unwrap();
    assert!(matches!(outcome, BalanceOutcome::Balanced { .. }));
    assert_eq!(partitioner.repartitions, 1);
}

#[test]
fn forced_check_repartitions_even_when_balanced() {
    let mut balancer = LoadBalancer::new(BalanceConfig::default());
    let mut partitioner = ScriptedPartitioner::new(vec![100, 100]);

    let outcome = balancer.step(&mut partitioner, 100, true).unwrap();
    assert!(matches!(outcome, BalanceOutcome::Repartitioned { .. }));
    assert_eq!(partitioner.repartitions, 1);
}

#[test]
fn disabled_interval_never_checks() {
    let mut balancer =
        LoadBalancer::new(BalanceConfig { interval_steps: 0, imbalance_threshold: 1.25 });
    let mut partitioner = ScriptedPartitioner::new(vec![1000, 0]);
    for _ in 0..10 {
        assert_eq!(balancer.step(&mut partitioner, 1000, false).unwrap(), BalanceOutcome::NotDue);
    }
}

#[test]
fn inconsistent_gather_is_fatal() {
    let mut balancer =
        LoadBalancer::new(BalanceConfig { interval_steps: 1, imbalance_threshold: 1.25 });
    let mut partitioner = ScriptedPartitioner::new(vec![100, 100, 100]);
    partitioner.broken_gather = true;

    let err = balancer.step(&mut partitioner, 100, false).unwrap_err();
    assert!(matches!(err, BalanceError::CountMismatch { expected: 3, got: 2 }));
    assert_eq!(partitioner.repartitions, 0, "must not repartition on inconsistent state");
}

#[test]
fn single_partition_is_always_balanced() {
    let mut balancer =
        LoadBalancer::new(BalanceConfig { interval_steps: 1, imbalance_threshold: 1.25 });
    let mut partitioner = SinglePartition;
    for count in [0, 10, 100_000] {
        let outcome = balancer.step(&mut partitioner, count, false).unwrap();
        assert!(matches!(outcome, BalanceOutcome::Balanced { imbalance } if imbalance == 1.0));
    }
}
