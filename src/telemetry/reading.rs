//! Per-tick sampling request, the unit of work between producers and workers.

/// Identifies one device emission: which device, owned by which user.
///
/// A producer builds one of these per tick and pushes it onto the job queue;
/// exactly one worker picks it up and expands it into a [`Message`](crate::Message).
/// There is no lifecycle beyond the queue transit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceReading {
    /// Device id, contiguous from 1 within one simulated fleet.
    pub device_id: u32,
    /// Owning user id; the fleet assigns one device per user.
    pub user_id: u32,
}
