pub(crate) mod device;
