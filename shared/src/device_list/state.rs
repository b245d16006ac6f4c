use std::{collections::HashSet, hash::Hash};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transport::filter::passes_filter;

/// Replicated shape of a device list, sent to remote observers whenever the
/// list is marked dirty.
///
/// Members whose device no longer exists are never included.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceListState<E: Eq + Hash> {
    pub devices: HashSet<E>,
    pub is_allow_list: bool,
    pub handle_incoming_packets: bool,
}

impl<E: Eq + Hash> DeviceListState<E> {
    pub fn new(devices: HashSet<E>, is_allow_list: bool, handle_incoming_packets: bool) -> Self {
        Self {
            devices,
            is_allow_list,
            handle_incoming_packets,
        }
    }

    pub fn is_member(&self, device: &E) -> bool {
        self.devices.contains(device)
    }

    /// Evaluates the list's filter on a replica, with the same polarity the
    /// coordinator uses for non-empty lists
    pub fn passes(&self, counterparty: &E) -> bool {
        if self.devices.is_empty() {
            return !self.is_allow_list;
        }
        passes_filter(&self.devices, self.is_allow_list, counterparty)
    }
}
