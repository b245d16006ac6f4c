//! Integration tests for updating device list membership
//! Covers merge/replace, the capacity bound, ignored identifiers and the
//! update notification.

use std::collections::HashSet;

use devnet_server::{shared::DeviceListError, DeviceListUpdateEvent};
use devnet_test::{assert_members, assert_mirrored, init_logging, TestEntity, TestNetwork};

fn as_set(devices: &[TestEntity]) -> HashSet<TestEntity> {
    devices.iter().copied().collect()
}

#[test]
fn replace_over_capacity_is_rejected_without_mutation() {
    init_logging();
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let devices = net.spawn_devices(&map, 3);
    net.server
        .device_list_mut(&holder)
        .unwrap()
        .set_device_limit(2);
    net.server.take_dirty_lists();

    let result = net
        .server
        .update_device_list(&holder, devices.clone(), false);

    assert_eq!(
        result,
        Err(DeviceListError::TooManyDevices {
            requested: 3,
            limit: 2
        })
    );
    assert_members!(net.server, holder, []);
    for device in &devices {
        assert_eq!(net.server.device_lists_of_count(device), Some(0));
    }
    assert!(!net.server.is_dirty(&holder));
    assert!(net.take_events().is_empty());
}

#[test]
fn replace_within_capacity_mirrors_membership() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    net.server
        .device_list_mut(&holder)
        .unwrap()
        .set_device_limit(2);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);

    assert_eq!(net.server.update_device_list(&holder, [a, b], false), Ok(()));

    assert_members!(net.server, holder, [a, b]);
    let holders: HashSet<TestEntity> = net.server.device_lists_of(&a).unwrap().copied().collect();
    assert_eq!(holders, as_set(&[holder]));
    assert_mirrored!(net.server, [a, b]);
    net.take_events();
}

#[test]
fn replace_drops_devices_missing_from_the_new_set() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);
    let c = net.spawn_device(&map);

    net.server
        .update_device_list(&holder, [a, b], false)
        .unwrap();
    net.server
        .update_device_list(&holder, [b, c], false)
        .unwrap();

    assert_members!(net.server, holder, [b, c]);
    assert!(!net.server.device_has_list(&a, &holder));
    assert!(net.server.device_has_list(&b, &holder));
    assert!(net.server.device_has_list(&c, &holder));
    assert_mirrored!(net.server, [a, b, c]);
    net.take_events();
}

#[test]
fn merge_unions_with_current_members() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);

    net.server.update_device_list(&holder, [a], false).unwrap();
    net.server.update_device_list(&holder, [b], true).unwrap();

    assert_members!(net.server, holder, [a, b]);
    assert_mirrored!(net.server, [a, b]);
    net.take_events();
}

#[test]
fn merge_capacity_is_checked_after_union() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    net.server
        .device_list_mut(&holder)
        .unwrap()
        .set_device_limit(2);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);
    let c = net.spawn_device(&map);

    net.server
        .update_device_list(&holder, [a, b], false)
        .unwrap();
    let result = net.server.update_device_list(&holder, [c], true);

    assert_eq!(
        result,
        Err(DeviceListError::TooManyDevices {
            requested: 3,
            limit: 2
        })
    );
    assert_members!(net.server, holder, [a, b]);
    assert!(!net.server.device_has_list(&c, &holder));

    // merging devices that are already members does not grow the set
    assert_eq!(net.server.update_device_list(&holder, [a, b], true), Ok(()));
    net.take_events();
}

#[test]
fn duplicates_collapse_before_capacity_check() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    net.server
        .device_list_mut(&holder)
        .unwrap()
        .set_device_limit(1);
    let a = net.spawn_device(&map);

    assert_eq!(net.server.update_device_list(&holder, [a, a, a], false), Ok(()));
    assert_members!(net.server, holder, [a]);
    net.take_events();
}

#[test]
fn merge_twice_is_idempotent() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let existing = net.spawn_device(&map);
    let devices = net.spawn_devices(&map, 3);
    net.server
        .update_device_list(&holder, [existing], false)
        .unwrap();

    net.server
        .update_device_list(&holder, devices.clone(), true)
        .unwrap();
    let once = net.server.device_list(&holder).unwrap().device_set();
    net.server
        .update_device_list(&holder, devices.clone(), true)
        .unwrap();
    let twice = net.server.device_list(&holder).unwrap().device_set();

    assert_eq!(once, twice);
    assert_eq!(twice.len(), 4);
    net.take_events();
}

#[test]
fn unknown_identifiers_are_ignored() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    // exists in the world but has no networking capability
    let plain = net.world.spawn(&map);
    let never_spawned = TestEntity::new(9_999);

    assert_eq!(
        net.server
            .update_device_list(&holder, [a, plain, never_spawned], false),
        Ok(())
    );

    assert_members!(net.server, holder, [a]);
    assert!(!net.server.has_device(&plain));
    assert_mirrored!(net.server, [a, plain, never_spawned]);
    net.take_events();
}

#[test]
fn missing_holder_is_reported() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let not_a_holder = net.spawn_device(&map);
    let a = net.spawn_device(&map);

    assert_eq!(
        net.server.update_device_list(&not_a_holder, [a], false),
        Err(DeviceListError::NoSuchHolder)
    );
    assert_eq!(net.server.device_lists_of_count(&a), Some(0));
}

#[test]
fn device_kept_across_update_keeps_its_back_reference() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);

    net.server.update_device_list(&holder, [a], false).unwrap();
    net.server
        .update_device_list(&holder, [a, b], false)
        .unwrap();

    assert!(net.server.device_has_list(&a, &holder));
    assert_eq!(net.server.device_lists_of_count(&a), Some(1));
    net.take_events();
}

#[test]
fn notification_carries_previous_and_requested_lists() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    let b = net.spawn_device(&map);
    let ghost = TestEntity::new(4_242);

    net.server.update_device_list(&holder, [a], false).unwrap();
    net.take_events();

    net.server
        .update_device_list(&holder, [b, ghost], false)
        .unwrap();
    let mut events = net.take_events();
    let updates: Vec<_> = events.read::<DeviceListUpdateEvent>().collect();

    assert_eq!(updates.len(), 1);
    let update = &updates[0];
    assert_eq!(update.holder, holder);
    assert_eq!(update.old_devices, vec![a]);
    // the requested list, including the identifier that was ignored
    assert_eq!(update.devices, vec![b, ghost]);
    assert_members!(net.server, holder, [b]);
}

#[test]
fn unchanged_update_still_marks_list_dirty() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.spawn_holder(&map);
    let a = net.spawn_device(&map);
    net.server.update_device_list(&holder, [a], false).unwrap();
    net.server.take_dirty_lists();

    net.server.update_device_list(&holder, [a], false).unwrap();

    assert!(net.server.is_dirty(&holder));
    assert_eq!(net.server.take_dirty_lists(), vec![holder]);
    assert!(!net.server.is_dirty(&holder));
    assert!(net.take_events().has::<DeviceListUpdateEvent>());
}

#[test]
fn update_through_mutable_handle() {
    let mut net = TestNetwork::default();
    let map = net.spawn_map();
    let holder = net.world.spawn(&map);
    let a = net.spawn_device(&map);

    let result = net.server.add_device_list(&holder).update([a], false);

    assert_eq!(result, Ok(()));
    assert!(net.server.device_list(&holder).unwrap().has_device(&a));
    net.take_events();
}
