use std::{
    collections::{hash_set::Iter, HashSet},
    hash::Hash,
};

use devnet_shared::{passes_filter, DeviceListSettings};

// DeviceList

/// Membership and policy held by a list holder entity. Only the coordinator
/// writes to it, so that every change is mirrored on the member's
/// back-reference.
pub(crate) struct DeviceList<E: Copy + Eq + Hash> {
    devices: HashSet<E>,
    settings: DeviceListSettings,
    configurators: HashSet<E>,
}

impl<E: Copy + Eq + Hash> DeviceList<E> {
    pub(crate) fn new(settings: DeviceListSettings) -> Self {
        Self {
            devices: HashSet::new(),
            settings,
            configurators: HashSet::new(),
        }
    }

    // Devices

    pub(crate) fn has_device(&self, device: &E) -> bool {
        self.devices.contains(device)
    }

    /// Returns false if the device was already a member
    pub(crate) fn add_device(&mut self, device: &E) -> bool {
        self.devices.insert(*device)
    }

    pub(crate) fn remove_device(&mut self, device: &E) -> bool {
        self.devices.remove(device)
    }

    pub(crate) fn devices(&self) -> Iter<'_, E> {
        self.devices.iter()
    }

    pub(crate) fn device_set(&self) -> &HashSet<E> {
        &self.devices
    }

    pub(crate) fn devices_count(&self) -> usize {
        self.devices.len()
    }

    pub(crate) fn clear_devices(&mut self) {
        self.devices.clear();
    }

    // Settings

    pub(crate) fn settings(&self) -> &DeviceListSettings {
        &self.settings
    }

    pub(crate) fn settings_mut(&mut self) -> &mut DeviceListSettings {
        &mut self.settings
    }

    pub(crate) fn device_limit(&self) -> usize {
        self.settings.device_limit
    }

    pub(crate) fn is_allow_list(&self) -> bool {
        self.settings.is_allow_list
    }

    pub(crate) fn handles_incoming_packets(&self) -> bool {
        self.settings.handle_incoming_packets
    }

    /// Whether traffic with the counterparty is allowed, for a non-empty list
    pub(crate) fn passes(&self, counterparty: &E) -> bool {
        passes_filter(&self.devices, self.settings.is_allow_list, counterparty)
    }

    // Configurators

    pub(crate) fn add_configurator(&mut self, configurator: &E) -> bool {
        self.configurators.insert(*configurator)
    }

    pub(crate) fn remove_configurator(&mut self, configurator: &E) -> bool {
        self.configurators.remove(configurator)
    }

    pub(crate) fn has_configurator(&self, configurator: &E) -> bool {
        self.configurators.contains(configurator)
    }

    pub(crate) fn configurators(&self) -> Iter<'_, E> {
        self.configurators.iter()
    }

    pub(crate) fn take_configurators(&mut self) -> HashSet<E> {
        std::mem::take(&mut self.configurators)
    }
}
