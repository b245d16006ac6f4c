/// Maximum number of devices a newly created device list may hold
pub const DEFAULT_DEVICE_LIMIT: usize = 32;

/// Prefix of the label used in place of an address for devices that have not
/// finished initializing yet
pub const UNINITIALIZED_LABEL_PREFIX: &str = "UID: ";
