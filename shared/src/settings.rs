use crate::constants::DEFAULT_DEVICE_LIMIT;

/// Per-list policy: how many devices a list may hold and how its
/// membership is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceListSettings {
    /// Maximum number of members. An update whose final set exceeds this is
    /// rejected as a whole.
    pub device_limit: usize,
    /// `true`: members are the only permitted counterparties.
    /// `false`: members are excluded, everyone else is permitted.
    pub is_allow_list: bool,
    /// Whether the filter is also applied to packets arriving at the holder
    pub handle_incoming_packets: bool,
}

impl Default for DeviceListSettings {
    fn default() -> Self {
        Self {
            device_limit: DEFAULT_DEVICE_LIMIT,
            is_allow_list: true,
            handle_incoming_packets: false,
        }
    }
}
