//! # Devnet Server
//! Coordinates per-entity device lists: named subsets of network devices
//! that act as allow-lists or deny-lists for the broadcasts a holder sends
//! and, optionally, the packets it receives. Membership is mirrored on both
//! the holder and the device, and is kept consistent as entities are
//! destroyed or maps are saved.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use devnet_shared::{
        passes_filter, BeforeBroadcastAttempt, BeforePacketSent, BroadcastFilter,
        DeviceListError, DeviceListSettings, DeviceListState, DeviceListUpdate, WorldRefType,
        DEFAULT_DEVICE_LIMIT, UNINITIALIZED_LABEL_PREFIX,
    };
}

mod device;
mod device_list;
mod events;
mod server;

pub use device_list::{DeviceListMut, DeviceListRef};
pub use events::{ConfiguratorShutdownEvent, DeviceListUpdateEvent, Event, Events};
pub use server::{DeviceListConfig, DeviceListServer};
