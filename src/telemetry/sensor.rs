//! # Sensor value synthesis.
//!
//! Pure leaf of the pipeline: maps a [`DeviceReading`] to a [`Message`] with
//! randomized, range-bounded vitals. No state, no concurrency, no I/O.
//!
//! ## Value ranges
//! - temperature: uniform in `[36.0, 38.0)` °C
//! - oxygen saturation: uniform in `[90.0, 100.0)` %
//! - heart rate (two independent samples): uniform in `[60.0, 100.0)` bpm
//! - moving: fair coin
//!
//! Every float is rounded to two decimals before it leaves this module.

use rand::Rng;

use crate::telemetry::{DeviceReading, Message};

/// Synthesizes one vitals sample for the given reading.
pub fn synthesize(reading: DeviceReading) -> Message {
    let mut rng = rand::rng();
    Message {
        device_id: reading.device_id,
        user_id: reading.user_id,
        heart_rate1: round2(rng.random_range(60.0..100.0)),
        heart_rate2: round2(rng.random_range(60.0..100.0)),
        oxygen_saturation: round2(rng.random_range(90.0..100.0)),
        moving: rng.random_bool(0.5),
        temperature: round2(rng.random_range(36.0..38.0)),
    }
}

/// Rounds to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_two_decimals(value: f64) {
        let scaled = value * 100.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-6,
            "{} has more than two decimals",
            value
        );
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(36.004), 36.0);
        assert_eq!(round2(36.005), 36.01);
        assert_eq!(round2(99.999), 100.0);
        assert_eq!(round2(60.0), 60.0);
    }

    #[test]
    fn test_ids_carried_through() {
        let msg = synthesize(DeviceReading {
            device_id: 42,
            user_id: 42,
        });
        assert_eq!(msg.device_id, 42);
        assert_eq!(msg.user_id, 42);
    }

    #[test]
    fn test_values_stay_in_range() {
        for id in 0..1000 {
            let msg = synthesize(DeviceReading {
                device_id: id,
                user_id: id,
            });

            assert!(
                (36.0..=38.0).contains(&msg.temperature),
                "temperature {} out of range",
                msg.temperature
            );
            assert!(
                (90.0..=100.0).contains(&msg.oxygen_saturation),
                "oxygen {} out of range",
                msg.oxygen_saturation
            );
            assert!(
                (60.0..=100.0).contains(&msg.heart_rate1),
                "heart rate 1 {} out of range",
                msg.heart_rate1
            );
            assert!(
                (60.0..=100.0).contains(&msg.heart_rate2),
                "heart rate 2 {} out of range",
                msg.heart_rate2
            );
        }
    }

    #[test]
    fn test_values_rounded_to_two_decimals() {
        for id in 0..1000 {
            let msg = synthesize(DeviceReading {
                device_id: id,
                user_id: id,
            });
            assert_two_decimals(msg.temperature);
            assert_two_decimals(msg.oxygen_saturation);
            assert_two_decimals(msg.heart_rate1);
            assert_two_decimals(msg.heart_rate2);
        }
    }

    #[test]
    fn test_heart_rate_samples_are_independent() {
        // Two identical samples 1000 times in a row would mean the second
        // draw is a copy of the first.
        let all_equal = (0..1000).all(|id| {
            let msg = synthesize(DeviceReading {
                device_id: id,
                user_id: id,
            });
            msg.heart_rate1 == msg.heart_rate2
        });
        assert!(!all_equal);
    }
}
