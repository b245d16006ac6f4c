mod events;

pub use events::{ConfiguratorShutdownEvent, DeviceListUpdateEvent, Event, Events};
