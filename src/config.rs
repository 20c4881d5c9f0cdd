//! # Fleet and pipeline configuration.
//!
//! Provides [`SimulatorConfig`] centralized settings for one simulation run.
//!
//! The config is read once per [`Simulator::start`](crate::Simulator::start):
//! changing fields after construction affects the next run, never a live one.
//!
//! ## Field semantics
//! - `device_count`: number of simulated devices, one producer task each
//! - `topic`: broker topic every outbound message is published to
//! - `job_capacity`: job queue size (producers block here when workers lag)
//! - `result_capacity`: result queue size (workers block here when the
//!   publisher lags)
//! - `notifier_capacity`: publish-event ring buffer size; slow observers skip
//!   events rather than slow the publisher down
//!
//! ## Worker sizing
//! The worker pool is sized from the fleet, clamped to
//! [`MIN_WORKERS`]..=[`MAX_WORKERS`]: a parallelism floor for tiny fleets, a
//! resource ceiling for large ones.

use std::ops::RangeInclusive;

/// Lower bound of the worker pool, applied to any fleet size.
pub const MIN_WORKERS: usize = 4;

/// Upper bound of the worker pool, applied to any fleet size.
pub const MAX_WORKERS: usize = 500;

/// Configuration for a simulation run.
///
/// All fields are public for flexibility; prefer the helper accessors where
/// one exists so clamping stays in one place.
#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Number of simulated devices.
    ///
    /// Each device gets its own producer task with a dedicated tick timer.
    /// Device ids are contiguous `1..=device_count`, and every device belongs
    /// to the user with the same id. Ids are 32-bit; a fleet larger than
    /// `u32::MAX` saturates at that many devices.
    pub device_count: usize,

    /// Broker topic the publisher sends every serialized message to.
    pub topic: String,

    /// Capacity of the job queue between producers and the worker pool.
    ///
    /// A full queue blocks producers on their next emission, which is the
    /// backpressure path that matches emission rate to worker throughput.
    pub job_capacity: usize,

    /// Capacity of the result queue between the worker pool and the publisher.
    pub result_capacity: usize,

    /// Capacity of the publish-event ring buffer handed to observers.
    ///
    /// Observers that lag behind more than this many events skip the oldest
    /// ones; the publisher never blocks on notification.
    pub notifier_capacity: usize,
}

impl SimulatorConfig {
    /// Returns the worker-pool size for this fleet.
    ///
    /// # Example
    /// ```
    /// use vitalsim::SimulatorConfig;
    ///
    /// let mut cfg = SimulatorConfig::default();
    ///
    /// cfg.device_count = 1;
    /// assert_eq!(cfg.worker_count(), 4);
    ///
    /// cfg.device_count = 100;
    /// assert_eq!(cfg.worker_count(), 100);
    ///
    /// cfg.device_count = 9_999;
    /// assert_eq!(cfg.worker_count(), 500);
    /// ```
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.device_count.clamp(MIN_WORKERS, MAX_WORKERS)
    }

    /// Returns the device ids for this fleet, contiguous from 1.
    ///
    /// Ids are 32-bit on the wire, so a fleet larger than `u32::MAX`
    /// saturates rather than wrapping to a smaller range.
    #[inline]
    pub fn device_ids(&self) -> RangeInclusive<u32> {
        1..=u32::try_from(self.device_count).unwrap_or(u32::MAX)
    }

    /// Returns the job-queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn job_capacity_clamped(&self) -> usize {
        self.job_capacity.max(1)
    }

    /// Returns the result-queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn result_capacity_clamped(&self) -> usize {
        self.result_capacity.max(1)
    }

    /// Returns the notifier capacity clamped to a minimum of 1.
    #[inline]
    pub fn notifier_capacity_clamped(&self) -> usize {
        self.notifier_capacity.max(1)
    }
}

impl Default for SimulatorConfig {
    /// Default configuration:
    ///
    /// - `device_count = 100`
    /// - `topic = "vitals/telemetry"`
    /// - `job_capacity = 1000`
    /// - `result_capacity = 1000`
    /// - `notifier_capacity = 1024`
    fn default() -> Self {
        Self {
            device_count: 100,
            topic: "vitals/telemetry".to_string(),
            job_capacity: 1000,
            result_capacity: 1000,
            notifier_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_devices(n: usize) -> SimulatorConfig {
        SimulatorConfig {
            device_count: n,
            ..SimulatorConfig::default()
        }
    }

    #[test]
    fn test_worker_count_floor() {
        assert_eq!(with_devices(0).worker_count(), MIN_WORKERS);
        assert_eq!(with_devices(1).worker_count(), MIN_WORKERS);
        assert_eq!(with_devices(3).worker_count(), MIN_WORKERS);
        assert_eq!(with_devices(4).worker_count(), 4);
    }

    #[test]
    fn test_worker_count_passthrough() {
        for n in [5, 17, 100, 499, 500] {
            assert_eq!(with_devices(n).worker_count(), n, "fleet size {}", n);
        }
    }

    #[test]
    fn test_worker_count_ceiling() {
        assert_eq!(with_devices(501).worker_count(), MAX_WORKERS);
        assert_eq!(with_devices(10_000).worker_count(), MAX_WORKERS);
        assert_eq!(with_devices(usize::MAX).worker_count(), MAX_WORKERS);
    }

    #[test]
    fn test_device_ids_contiguous_from_one() {
        assert_eq!(with_devices(5).device_ids(), 1..=5);
        assert_eq!(with_devices(1).device_ids(), 1..=1);
        assert!(with_devices(0).device_ids().is_empty());
    }

    #[test]
    fn test_device_ids_saturate_at_u32_max() {
        let ids = with_devices(usize::MAX).device_ids();
        assert_eq!(*ids.start(), 1);
        assert_eq!(*ids.end(), u32::MAX);
    }

    #[test]
    fn test_capacities_clamped_to_one() {
        let cfg = SimulatorConfig {
            job_capacity: 0,
            result_capacity: 0,
            notifier_capacity: 0,
            ..SimulatorConfig::default()
        };
        assert_eq!(cfg.job_capacity_clamped(), 1);
        assert_eq!(cfg.result_capacity_clamped(), 1);
        assert_eq!(cfg.notifier_capacity_clamped(), 1);
    }

    #[test]
    fn test_defaults() {
        let cfg = SimulatorConfig::default();
        assert_eq!(cfg.device_count, 100);
        assert_eq!(cfg.job_capacity, 1000);
        assert_eq!(cfg.result_capacity, 1000);
        assert_eq!(cfg.notifier_capacity, 1024);
        assert_eq!(cfg.topic, "vitals/telemetry");
    }
}
