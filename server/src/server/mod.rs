mod device_list_server;
mod server_config;

pub use device_list_server::DeviceListServer;
pub use server_config::DeviceListConfig;
