use std::default::Default;

use devnet_shared::DeviceListSettings;

/// Contains Config properties which will be used by the DeviceListServer
#[derive(Clone)]
pub struct DeviceListConfig {
    /// Settings given to every newly created device list
    pub default_settings: DeviceListSettings,
    /// Log memberships pruned by a map save at `warn` level rather than
    /// `debug`. A prune means a device and its holder were split across
    /// maps, which normally should not happen.
    pub warn_on_map_prune: bool,
}

impl Default for DeviceListConfig {
    fn default() -> Self {
        Self {
            default_settings: DeviceListSettings::default(),
            warn_on_map_prune: true,
        }
    }
}
