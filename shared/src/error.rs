use thiserror::Error as ThisError;

/// Errors returned when updating the membership of a device list.
///
/// Neither variant leaves partial state behind: a rejected update mutates
/// nothing.
#[derive(Debug, Clone, Copy, ThisError, PartialEq, Eq)]
pub enum DeviceListError {
    /// The target entity has no device list
    #[error("Entity has no device list")]
    NoSuchHolder,

    /// The resulting membership would exceed the list's device limit
    #[error("Too many devices: {requested} requested, limit is {limit}")]
    TooManyDevices { requested: usize, limit: usize },
}
