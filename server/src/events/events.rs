use std::{hash::Hash, mem, vec::IntoIter};

use log::warn;

use devnet_shared::DeviceListUpdate;

/// Notifications produced by the coordinator since the last
/// `DeviceListServer::take_events()`.
pub struct Events<E: Hash + Copy + Eq + Sync + Send> {
    updates: Vec<DeviceListUpdate<E>>,
    configurator_shutdowns: Vec<(E, E)>,
}

impl<E: Hash + Copy + Eq + Sync + Send> Events<E> {
    pub(crate) fn new() -> Self {
        Self {
            updates: Vec::new(),
            configurator_shutdowns: Vec::new(),
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.configurator_shutdowns.is_empty()
    }

    pub fn read<V: Event<E>>(&mut self) -> V::Iter {
        return V::iter(self);
    }

    pub fn has<V: Event<E>>(&self) -> bool {
        return V::has(self);
    }

    // Crate-public

    pub(crate) fn push_update(&mut self, holder: &E, old_devices: Vec<E>, devices: Vec<E>) {
        self.updates
            .push(DeviceListUpdate::new(*holder, old_devices, devices));
    }

    pub(crate) fn push_configurator_shutdown(&mut self, configurator: &E, holder: &E) {
        self.configurator_shutdowns.push((*configurator, *holder));
    }
}

impl<E: Hash + Copy + Eq + Sync + Send> Drop for Events<E> {
    fn drop(&mut self) {
        if !self.updates.is_empty() {
            warn!("Dropped Device List Update Event(s)! Make sure to handle these through `events.read::<DeviceListUpdateEvent>()`.");
        }
        if !self.configurator_shutdowns.is_empty() {
            warn!("Dropped Configurator Shutdown Event(s)! Make sure to handle these through `events.read::<ConfiguratorShutdownEvent>()`.");
        }
    }
}

// Event Trait
pub trait Event<E: Hash + Copy + Eq + Sync + Send> {
    type Iter;

    fn iter(events: &mut Events<E>) -> Self::Iter;

    fn has(events: &Events<E>) -> bool;
}

// DeviceListUpdateEvent
pub struct DeviceListUpdateEvent;
impl<E: Hash + Copy + Eq + Sync + Send> Event<E> for DeviceListUpdateEvent {
    type Iter = IntoIter<DeviceListUpdate<E>>;

    fn iter(events: &mut Events<E>) -> Self::Iter {
        let list = mem::take(&mut events.updates);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events<E>) -> bool {
        !events.updates.is_empty()
    }
}

// ConfiguratorShutdownEvent
/// Yields `(configurator, holder)` for each configurator that was attached
/// to a list when its holder was destroyed.
pub struct ConfiguratorShutdownEvent;
impl<E: Hash + Copy + Eq + Sync + Send> Event<E> for ConfiguratorShutdownEvent {
    type Iter = IntoIter<(E, E)>;

    fn iter(events: &mut Events<E>) -> Self::Iter {
        let list = mem::take(&mut events.configurator_shutdowns);
        return IntoIterator::into_iter(list);
    }

    fn has(events: &Events<E>) -> bool {
        !events.configurator_shutdowns.is_empty()
    }
}
