//! # Outbound vitals message and its wire representation.
//!
//! [`Message`] is the entity the publisher serializes and hands to the broker.
//! The JSON field names are a compatibility contract with downstream
//! consumers and must not change:
//!
//! ```json
//! {
//!   "deviceId": 7,
//!   "userId": 7,
//!   "heartRate1": 72.41,
//!   "heartRate2": 88.03,
//!   "oxygenSaturation": 97.5,
//!   "moving": true,
//!   "temperature": 36.84
//! }
//! ```

use serde::{Deserialize, Serialize};

/// One synthesized vitals sample for a single device.
///
/// Created by a worker from one [`DeviceReading`](crate::DeviceReading), owned by the
/// pipeline until the publisher serializes it, then discarded. Values are
/// rounded to two decimals at synthesis time, so the wire form carries at
/// most two fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Device the sample belongs to.
    pub device_id: u32,
    /// User wearing the device.
    pub user_id: u32,
    /// First heart-rate sample, beats per minute.
    pub heart_rate1: f64,
    /// Second heart-rate sample, beats per minute.
    pub heart_rate2: f64,
    /// Blood oxygen saturation, percent.
    pub oxygen_saturation: f64,
    /// Whether the wearer was in motion during the sample.
    pub moving: bool,
    /// Body temperature, degrees Celsius.
    pub temperature: f64,
}
