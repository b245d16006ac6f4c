//! # Devnet Shared
//! Common functionality shared between the devnet-server device list
//! coordinator and the hosts that drive it: the host world interface, the
//! transport hook events, the allow/deny predicate and the replicated state
//! payload.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod constants;
mod device_list;
mod error;
mod settings;
mod transport;
mod world;

pub use constants::{DEFAULT_DEVICE_LIMIT, UNINITIALIZED_LABEL_PREFIX};
pub use device_list::{state::DeviceListState, update::DeviceListUpdate};
pub use error::DeviceListError;
pub use settings::DeviceListSettings;
pub use transport::{
    filter::{passes_filter, BroadcastFilter},
    hooks::{BeforeBroadcastAttempt, BeforePacketSent},
};
pub use world::world_type::WorldRefType;
