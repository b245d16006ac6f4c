use std::{
    collections::{hash_map::Entry, hash_set::Iter, HashMap, HashSet},
    fmt::{Debug, Display},
    hash::Hash,
    mem,
};

use log::{info, log, warn, Level};

use devnet_shared::{
    BeforeBroadcastAttempt, BeforePacketSent, BroadcastFilter, DeviceListError,
    DeviceListSettings, DeviceListState, WorldRefType, DEFAULT_DEVICE_LIMIT,
    UNINITIALIZED_LABEL_PREFIX,
};

use crate::{
    device::device::Device, device_list::device_list::DeviceList, events::Events,
    DeviceListConfig, DeviceListMut, DeviceListRef,
};

/// Coordinates device lists and the devices they reference.
///
/// This is the only writer of both halves of the membership relation: a
/// holder's list of devices, and each device's cache of the holders that
/// list it. Every public mutation leaves the two mirrored.
pub struct DeviceListServer<E: Copy + Eq + Hash + Send + Sync + Debug> {
    config: DeviceListConfig,
    // Device Lists
    device_lists: HashMap<E, DeviceList<E>>,
    // Devices
    devices: HashMap<E, Device<E>>,
    // State sync
    dirty_lists: HashSet<E>,
    // Events
    incoming_events: Events<E>,
}

impl<E: Copy + Eq + Hash + Send + Sync + Debug> Default for DeviceListServer<E> {
    fn default() -> Self {
        Self::new(DeviceListConfig::default())
    }
}

impl<E: Copy + Eq + Hash + Send + Sync + Debug> DeviceListServer<E> {
    /// Create a new DeviceListServer
    pub fn new(config: DeviceListConfig) -> Self {
        Self {
            config,
            device_lists: HashMap::new(),
            devices: HashMap::new(),
            dirty_lists: HashSet::new(),
            incoming_events: Events::new(),
        }
    }

    pub fn config(&self) -> &DeviceListConfig {
        &self.config
    }

    // Device Lists

    /// Gives the holder a device list using the configured default settings,
    /// and returns a DeviceListMut for it. An existing list is left as is.
    pub fn add_device_list(&'_ mut self, holder: &E) -> DeviceListMut<'_, E> {
        let settings = self.config.default_settings;
        self.add_device_list_with_settings(holder, settings)
    }

    /// Gives the holder a device list with the given settings. An existing
    /// list keeps its current settings and members. A device limit of 0 is
    /// replaced by the default limit.
    pub fn add_device_list_with_settings(
        &'_ mut self,
        holder: &E,
        mut settings: DeviceListSettings,
    ) -> DeviceListMut<'_, E> {
        if !self.device_lists.contains_key(holder) {
            if settings.device_limit == 0 {
                warn!(
                    "device list of {:?} created with a device limit of 0, using {} instead",
                    holder, DEFAULT_DEVICE_LIMIT
                );
                settings.device_limit = DEFAULT_DEVICE_LIMIT;
            }
            info!("creating device list for {:?}", holder);
            self.device_lists.insert(*holder, DeviceList::new(settings));
            self.dirty_lists.insert(*holder);
        }
        DeviceListMut::new(self, holder)
    }

    pub fn has_device_list(&self, holder: &E) -> bool {
        self.device_lists.contains_key(holder)
    }

    /// Retrieves a DeviceListRef that exposes read operations for the list
    /// held by the given entity
    pub fn device_list(&'_ self, holder: &E) -> Option<DeviceListRef<'_, E>> {
        if self.device_lists.contains_key(holder) {
            return Some(DeviceListRef::new(self, holder));
        }
        None
    }

    /// Retrieves a DeviceListMut that exposes read and write operations for
    /// the list held by the given entity
    pub fn device_list_mut(&'_ mut self, holder: &E) -> Option<DeviceListMut<'_, E>> {
        if self.device_lists.contains_key(holder) {
            return Some(DeviceListMut::new(self, holder));
        }
        None
    }

    /// Return a list of all entities holding a device list
    pub fn device_list_holders(&self) -> Vec<E> {
        self.device_lists.keys().copied().collect()
    }

    pub fn device_lists_count(&self) -> usize {
        self.device_lists.len()
    }

    /// Tears down the holder's device list: attached configurators are
    /// notified, every member drops the holder from its back-reference, and
    /// the list is discarded. Returns true if the list existed.
    pub fn remove_device_list(&mut self, holder: &E) -> bool {
        let Some(mut device_list) = self.device_lists.remove(holder) else {
            return false;
        };

        for configurator in device_list.take_configurators() {
            self.incoming_events
                .push_configurator_shutdown(&configurator, holder);
        }

        for device in device_list.devices() {
            if let Some(record) = self.devices.get_mut(device) {
                record.uncache_list(holder);
            }
        }
        device_list.clear_devices();

        // nothing left to replicate
        self.dirty_lists.remove(holder);

        info!("removed device list for {:?}", holder);
        true
    }

    // Devices

    /// Gives the entity networking capability, making it eligible for list
    /// membership
    pub fn add_device(&mut self, entity: &E) {
        self.devices.entry(*entity).or_insert_with(Device::new);
    }

    pub fn has_device(&self, entity: &E) -> bool {
        self.devices.contains_key(entity)
    }

    pub fn devices_count(&self) -> usize {
        self.devices.len()
    }

    /// Returns an iterator over the holders whose lists contain the device
    pub fn device_lists_of(&'_ self, device: &E) -> Option<Iter<'_, E>> {
        self.devices.get(device).map(|record| record.list_holders())
    }

    /// Get a count of how many lists contain the device
    pub fn device_lists_of_count(&self, device: &E) -> Option<usize> {
        self.devices.get(device).map(|record| record.list_count())
    }

    /// Removes the entity's networking capability and removes it from every
    /// list that contains it. Each affected list is marked dirty. Returns
    /// true if the device existed.
    pub fn remove_device(&mut self, entity: &E) -> bool {
        let Some(record) = self.devices.remove(entity) else {
            return false;
        };

        // the device's cache of holders is exactly the set of lists that
        // reference it, so no global scan is needed
        for holder in record.list_holders() {
            let Some(device_list) = self.device_lists.get_mut(holder) else {
                continue;
            };
            if device_list.remove_device(entity) {
                self.dirty_lists.insert(*holder);
            }
        }

        true
    }

    // Lifecycle

    /// Handles the host destroying an entity, which may be a list holder, a
    /// device, an attached configurator, or any combination of those
    pub fn on_entity_destroyed(&mut self, entity: &E) {
        self.remove_device_list(entity);
        self.remove_device(entity);

        for device_list in self.device_lists.values_mut() {
            device_list.remove_configurator(entity);
        }
    }

    /// Prunes memberships that would dangle once the given map is saved.
    ///
    /// For every list whose holder resides on `map`, members that no longer
    /// exist or that reside on another map are removed, with the removal
    /// mirrored on the device. Each affected list emits an update event and
    /// is marked dirty.
    pub fn on_map_save<W: WorldRefType<E>>(&mut self, world: &W, map: &E) {
        let prune_level = if self.config.warn_on_map_prune {
            Level::Warn
        } else {
            Level::Debug
        };

        let mut to_remove: Vec<E> = Vec::new();
        for (holder, device_list) in self.device_lists.iter_mut() {
            if world.entity_map(holder).as_ref() != Some(map) {
                continue;
            }

            for device in device_list.devices() {
                if !self.devices.contains_key(device) {
                    log!(
                        prune_level,
                        "device list of {:?} references {:?}, which is no longer a device",
                        holder,
                        device
                    );
                    to_remove.push(*device);
                    continue;
                }

                match world.entity_map(device) {
                    Some(device_map) if device_map == *map => {}
                    Some(device_map) => {
                        log!(
                            prune_level,
                            "device list of {:?} on map {:?} references {:?} on map {:?}, removing it before save",
                            holder,
                            map,
                            device,
                            device_map
                        );
                        to_remove.push(*device);
                    }
                    None => {
                        log!(
                            prune_level,
                            "device list of {:?} references {:?}, which no longer exists",
                            holder,
                            device
                        );
                        to_remove.push(*device);
                    }
                }
            }

            if to_remove.is_empty() {
                continue;
            }

            let old_devices: Vec<E> = device_list.devices().copied().collect();
            for device in to_remove.drain(..) {
                device_list.remove_device(&device);
                if let Some(record) = self.devices.get_mut(&device) {
                    record.uncache_list(holder);
                }
            }
            let devices: Vec<E> = device_list.devices().copied().collect();

            self.incoming_events.push_update(holder, old_devices, devices);
            self.dirty_lists.insert(*holder);
        }
    }

    // Membership

    /// Updates the devices stored in the holder's list.
    ///
    /// With `merge` the given devices are added to the current members,
    /// otherwise they replace them. If the resulting set would exceed the
    /// list's device limit nothing is changed. Identifiers that are not
    /// devices are ignored.
    pub fn update_device_list(
        &mut self,
        holder: &E,
        devices: impl IntoIterator<Item = E>,
        merge: bool,
    ) -> Result<(), DeviceListError> {
        let Some(device_list) = self.device_lists.get_mut(holder) else {
            return Err(DeviceListError::NoSuchHolder);
        };

        let requested: Vec<E> = devices.into_iter().collect();
        let mut new_devices: HashSet<E> = requested.iter().copied().collect();
        if merge {
            new_devices.extend(device_list.devices().copied());
        }

        let limit = device_list.device_limit();
        if new_devices.len() > limit {
            return Err(DeviceListError::TooManyDevices {
                requested: new_devices.len(),
                limit,
            });
        }

        let old_devices: Vec<E> = device_list.devices().copied().collect();

        // removals are applied before additions
        for device in &old_devices {
            if new_devices.contains(device) {
                continue;
            }
            device_list.remove_device(device);
            if let Some(record) = self.devices.get_mut(device) {
                record.uncache_list(holder);
            }
        }

        for device in &new_devices {
            let Some(record) = self.devices.get_mut(device) else {
                continue;
            };
            if !device_list.add_device(device) {
                continue;
            }
            record.cache_list(holder);
        }

        self.incoming_events
            .push_update(holder, old_devices, requested);
        self.dirty_lists.insert(*holder);

        Ok(())
    }

    /// Maps each member's address to the member. Members that have not
    /// finished initializing, or have no address yet, are keyed by a
    /// `"UID: <entity>"` label instead. Members the host has already
    /// destroyed are skipped.
    pub fn device_list_members<W: WorldRefType<E>>(
        &self,
        world: &W,
        holder: &E,
    ) -> HashMap<String, E>
    where
        E: Display,
    {
        let Some(device_list) = self.device_lists.get(holder) else {
            return HashMap::new();
        };

        let mut members = HashMap::with_capacity(device_list.devices_count());
        for device in device_list.devices() {
            if !self.devices.contains_key(device) || !world.has_entity(device) {
                continue;
            }

            let address = if world.is_map_initialized(device) {
                world.device_address(device)
            } else {
                None
            };
            let label =
                address.unwrap_or_else(|| format!("{}{}", UNINITIALIZED_LABEL_PREFIX, device));

            match members.entry(label) {
                Entry::Occupied(entry) => {
                    warn!(
                        "device list of {:?}: {:?} and {:?} share address {}, listing only the first",
                        holder,
                        entry.get(),
                        device,
                        entry.key()
                    );
                }
                Entry::Vacant(entry) => {
                    entry.insert(*device);
                }
            }
        }
        members
    }

    /// Whether a member of the holder's list has the given address (or
    /// fallback label)
    pub fn exists_in_device_list<W: WorldRefType<E>>(
        &self,
        world: &W,
        holder: &E,
        address: &str,
    ) -> bool
    where
        E: Display,
    {
        self.device_list_members(world, holder)
            .contains_key(address)
    }

    // Transport hooks

    /// Decides which of the candidates may receive a broadcast sent by the
    /// holder. An entity without a list places no restriction.
    pub fn filter_broadcast_recipients(
        &self,
        holder: &E,
        candidates: impl IntoIterator<Item = E>,
    ) -> BroadcastFilter<E> {
        let Some(device_list) = self.device_lists.get(holder) else {
            return BroadcastFilter::Unfiltered;
        };

        if device_list.devices_count() == 0 {
            if device_list.is_allow_list() {
                return BroadcastFilter::Cancel;
            }
            return BroadcastFilter::Unfiltered;
        }

        BroadcastFilter::Filtered(
            candidates
                .into_iter()
                .filter(|candidate| device_list.passes(candidate))
                .collect(),
        )
    }

    /// Applies the holder's list to a broadcast it is about to send
    pub fn on_before_broadcast(&self, holder: &E, attempt: &mut BeforeBroadcastAttempt<E>) {
        let filter =
            self.filter_broadcast_recipients(holder, attempt.recipients().iter().copied());
        match filter {
            BroadcastFilter::Cancel => attempt.cancel(),
            BroadcastFilter::Unfiltered => {}
            BroadcastFilter::Filtered(recipients) => attempt.set_modified_recipients(recipients),
        }
    }

    /// Whether a packet from `sender` may be delivered to the holder. Only
    /// lists that handle incoming packets filter anything.
    pub fn filter_inbound_packet(&self, holder: &E, sender: &E) -> bool {
        let Some(device_list) = self.device_lists.get(holder) else {
            return true;
        };
        if !device_list.handles_incoming_packets() {
            return true;
        }
        device_list.passes(sender)
    }

    /// Applies the holder's list to a packet about to be delivered to it
    pub fn on_before_packet_sent(&self, holder: &E, packet: &mut BeforePacketSent<E>) {
        if !self.filter_inbound_packet(holder, &packet.sender()) {
            packet.cancel();
        }
    }

    // State sync

    /// Builds the replicated state of the holder's list. Members the host has
    /// destroyed are left out, even before `on_entity_destroyed` has run for
    /// them.
    pub fn device_list_state<W: WorldRefType<E>>(
        &self,
        world: &W,
        holder: &E,
    ) -> Option<DeviceListState<E>> {
        let device_list = self.device_lists.get(holder)?;
        let devices = device_list
            .devices()
            .filter(|device| self.devices.contains_key(device) && world.has_entity(device))
            .copied()
            .collect();
        Some(DeviceListState::new(
            devices,
            device_list.is_allow_list(),
            device_list.handles_incoming_packets(),
        ))
    }

    /// Whether the holder's list changed since the last `take_dirty_lists`
    pub fn is_dirty(&self, holder: &E) -> bool {
        self.dirty_lists.contains(holder)
    }

    /// Drains the holders whose lists need to be replicated
    pub fn take_dirty_lists(&mut self) -> Vec<E> {
        mem::take(&mut self.dirty_lists).into_iter().collect()
    }

    /// Drains the notifications produced since the last call
    pub fn take_events(&mut self) -> Events<E> {
        mem::replace(&mut self.incoming_events, Events::new())
    }

    // Crate-Public methods

    pub(crate) fn mark_dirty(&mut self, holder: &E) {
        if self.device_lists.contains_key(holder) {
            self.dirty_lists.insert(*holder);
        }
    }

    //// Device List members

    pub(crate) fn list_has_device(&self, holder: &E, device: &E) -> bool {
        let Some(device_list) = self.device_lists.get(holder) else {
            return false;
        };
        device_list.has_device(device)
    }

    pub(crate) fn list_devices(&self, holder: &E) -> impl Iterator<Item = &E> {
        self.device_lists
            .get(holder)
            .map(|device_list| device_list.devices())
            .into_iter()
            .flatten()
    }

    pub(crate) fn list_device_set(&self, holder: &E) -> Option<&HashSet<E>> {
        self.device_lists
            .get(holder)
            .map(|device_list| device_list.device_set())
    }

    pub(crate) fn list_devices_count(&self, holder: &E) -> usize {
        if let Some(device_list) = self.device_lists.get(holder) {
            return device_list.devices_count();
        }
        0
    }

    //// Device List settings

    pub(crate) fn list_settings(&self, holder: &E) -> Option<DeviceListSettings> {
        self.device_lists
            .get(holder)
            .map(|device_list| *device_list.settings())
    }

    pub(crate) fn list_set_device_limit(&mut self, holder: &E, device_limit: usize) {
        if device_limit == 0 {
            warn!(
                "ignoring device limit of 0 for device list of {:?}, limit must be positive",
                holder
            );
            return;
        }
        if let Some(device_list) = self.device_lists.get_mut(holder) {
            device_list.settings_mut().device_limit = device_limit;
        }
    }

    pub(crate) fn list_set_allow_list(&mut self, holder: &E, is_allow_list: bool) {
        if let Some(device_list) = self.device_lists.get_mut(holder) {
            device_list.settings_mut().is_allow_list = is_allow_list;
            self.dirty_lists.insert(*holder);
        }
    }

    pub(crate) fn list_set_handle_incoming_packets(&mut self, holder: &E, handle: bool) {
        if let Some(device_list) = self.device_lists.get_mut(holder) {
            device_list.settings_mut().handle_incoming_packets = handle;
            self.dirty_lists.insert(*holder);
        }
    }

    //// Device List configurators

    pub(crate) fn list_add_configurator(&mut self, holder: &E, configurator: &E) {
        if let Some(device_list) = self.device_lists.get_mut(holder) {
            device_list.add_configurator(configurator);
        }
    }

    pub(crate) fn list_remove_configurator(&mut self, holder: &E, configurator: &E) {
        if let Some(device_list) = self.device_lists.get_mut(holder) {
            device_list.remove_configurator(configurator);
        }
    }

    pub(crate) fn list_has_configurator(&self, holder: &E, configurator: &E) -> bool {
        let Some(device_list) = self.device_lists.get(holder) else {
            return false;
        };
        device_list.has_configurator(configurator)
    }

    pub(crate) fn list_configurators(&self, holder: &E) -> impl Iterator<Item = &E> {
        self.device_lists
            .get(holder)
            .map(|device_list| device_list.configurators())
            .into_iter()
            .flatten()
    }

    //// Devices

    /// Whether the device's back-reference contains the holder
    pub fn device_has_list(&self, device: &E, holder: &E) -> bool {
        let Some(record) = self.devices.get(device) else {
            return false;
        };
        record.has_list(holder)
    }
}
