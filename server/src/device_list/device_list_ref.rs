use std::{collections::HashSet, fmt::Debug, hash::Hash};

use devnet_shared::{DeviceListError, DeviceListSettings};

use crate::DeviceListServer;

// DeviceListRef
pub struct DeviceListRef<'s, E: Copy + Eq + Hash + Send + Sync + Debug> {
    server: &'s DeviceListServer<E>,
    key: E,
}

impl<'s, E: Copy + Eq + Hash + Send + Sync + Debug> DeviceListRef<'s, E> {
    pub(crate) fn new(server: &'s DeviceListServer<E>, key: &E) -> Self {
        Self { server, key: *key }
    }

    /// The entity holding this list
    pub fn holder(&self) -> E {
        self.key
    }

    // Devices

    pub fn has_device(&self, device: &E) -> bool {
        self.server.list_has_device(&self.key, device)
    }

    pub fn devices(&self) -> impl Iterator<Item = &E> {
        self.server.list_devices(&self.key)
    }

    pub fn device_set(&self) -> HashSet<E> {
        self.server
            .list_device_set(&self.key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn devices_count(&self) -> usize {
        self.server.list_devices_count(&self.key)
    }

    // Settings

    pub fn settings(&self) -> DeviceListSettings {
        self.server
            .list_settings(&self.key)
            .unwrap_or_default()
    }

    pub fn device_limit(&self) -> usize {
        self.settings().device_limit
    }

    pub fn is_allow_list(&self) -> bool {
        self.settings().is_allow_list
    }

    pub fn handles_incoming_packets(&self) -> bool {
        self.settings().handle_incoming_packets
    }

    // Configurators

    pub fn has_configurator(&self, configurator: &E) -> bool {
        self.server.list_has_configurator(&self.key, configurator)
    }

    pub fn configurators(&self) -> impl Iterator<Item = &E> {
        self.server.list_configurators(&self.key)
    }
}

// DeviceListMut
pub struct DeviceListMut<'s, E: Copy + Eq + Hash + Send + Sync + Debug> {
    server: &'s mut DeviceListServer<E>,
    key: E,
}

impl<'s, E: Copy + Eq + Hash + Send + Sync + Debug> DeviceListMut<'s, E> {
    pub(crate) fn new(server: &'s mut DeviceListServer<E>, key: &E) -> Self {
        Self { server, key: *key }
    }

    pub fn holder(&self) -> E {
        self.key
    }

    pub fn destroy(self) -> bool {
        self.server.remove_device_list(&self.key)
    }

    // Devices

    pub fn has_device(&self, device: &E) -> bool {
        self.server.list_has_device(&self.key, device)
    }

    pub fn devices(&self) -> impl Iterator<Item = &E> {
        self.server.list_devices(&self.key)
    }

    pub fn devices_count(&self) -> usize {
        self.server.list_devices_count(&self.key)
    }

    /// Merges the devices into, or replaces, the list's membership. See
    /// [`DeviceListServer::update_device_list`].
    pub fn update(
        &mut self,
        devices: impl IntoIterator<Item = E>,
        merge: bool,
    ) -> Result<(), DeviceListError> {
        self.server.update_device_list(&self.key, devices, merge)
    }

    // Settings

    pub fn settings(&self) -> DeviceListSettings {
        self.server
            .list_settings(&self.key)
            .unwrap_or_default()
    }

    /// Existing members are kept even if they exceed the new limit
    pub fn set_device_limit(&mut self, device_limit: usize) -> &mut Self {
        self.server.list_set_device_limit(&self.key, device_limit);

        self
    }

    pub fn set_allow_list(&mut self, is_allow_list: bool) -> &mut Self {
        self.server.list_set_allow_list(&self.key, is_allow_list);

        self
    }

    pub fn set_handle_incoming_packets(&mut self, handle: bool) -> &mut Self {
        self.server
            .list_set_handle_incoming_packets(&self.key, handle);

        self
    }

    /// Marks the list for replication without changing it
    pub fn mark_dirty(&mut self) -> &mut Self {
        self.server.mark_dirty(&self.key);

        self
    }

    // Configurators

    /// Attaches a configurator, which will be notified if the list is
    /// destroyed while it is attached
    pub fn add_configurator(&mut self, configurator: &E) -> &mut Self {
        self.server.list_add_configurator(&self.key, configurator);

        self
    }

    pub fn remove_configurator(&mut self, configurator: &E) -> &mut Self {
        self.server
            .list_remove_configurator(&self.key, configurator);

        self
    }

    pub fn has_configurator(&self, configurator: &E) -> bool {
        self.server.list_has_configurator(&self.key, configurator)
    }
}
