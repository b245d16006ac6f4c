pub(crate) mod device_list;
mod device_list_ref;

pub use device_list_ref::{DeviceListMut, DeviceListRef};
