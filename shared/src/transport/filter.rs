use std::{collections::HashSet, hash::Hash};

/// Outcome of running a broadcast through a device list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BroadcastFilter<E: Eq + Hash> {
    /// Nobody may receive the broadcast
    Cancel,
    /// The list places no restriction on this broadcast
    Unfiltered,
    /// Only these recipients may receive it
    Filtered(HashSet<E>),
}

/// Whether traffic to or from `counterparty` is permitted by a list.
///
/// The same identity covers both modes: an allow-list keeps members, a
/// deny-list keeps non-members.
pub fn passes_filter<E: Eq + Hash>(
    devices: &HashSet<E>,
    is_allow_list: bool,
    counterparty: &E,
) -> bool {
    devices.contains(counterparty) == is_allow_list
}
