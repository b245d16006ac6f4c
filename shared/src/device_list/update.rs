/// Membership-changed notification.
///
/// `old_devices` is the full membership before the change. For a caller
/// driven update `devices` is the list the caller *requested*, which may
/// still contain identifiers that were ignored; for a partition prune it is
/// the membership that remained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceListUpdate<E> {
    pub holder: E,
    pub old_devices: Vec<E>,
    pub devices: Vec<E>,
}

impl<E> DeviceListUpdate<E> {
    pub fn new(holder: E, old_devices: Vec<E>, devices: Vec<E>) -> Self {
        Self {
            holder,
            old_devices,
            devices,
        }
    }
}
