use devnet_server::{DeviceListConfig, DeviceListServer, Events};

use crate::{TestEntity, TestWorld};

/// A TestWorld paired with a DeviceListServer, driven the way a host would
/// drive it: destroying an entity removes it from the world and then runs
/// the coordinator's lifecycle hook.
pub struct TestNetwork {
    pub world: TestWorld,
    pub server: DeviceListServer<TestEntity>,
}

impl Default for TestNetwork {
    fn default() -> Self {
        Self::new(DeviceListConfig::default())
    }
}

impl TestNetwork {
    pub fn new(config: DeviceListConfig) -> Self {
        Self {
            world: TestWorld::new(),
            server: DeviceListServer::new(config),
        }
    }

    pub fn spawn_map(&mut self) -> TestEntity {
        self.world.spawn_map()
    }

    /// Spawns a networked entity on the map
    pub fn spawn_device(&mut self, map: &TestEntity) -> TestEntity {
        let entity = self.world.spawn(map);
        self.server.add_device(&entity);
        entity
    }

    /// Spawns an entity on the map that holds a device list
    pub fn spawn_holder(&mut self, map: &TestEntity) -> TestEntity {
        let entity = self.world.spawn(map);
        self.server.add_device_list(&entity);
        entity
    }

    /// Spawns an entity that both holds a list and is itself a device
    pub fn spawn_controller(&mut self, map: &TestEntity) -> TestEntity {
        let entity = self.spawn_device(map);
        self.server.add_device_list(&entity);
        entity
    }

    pub fn spawn_devices(&mut self, map: &TestEntity, count: usize) -> Vec<TestEntity> {
        (0..count).map(|_| self.spawn_device(map)).collect()
    }

    pub fn despawn(&mut self, entity: &TestEntity) {
        self.world.despawn(entity);
        self.server.on_entity_destroyed(entity);
    }

    pub fn save_map(&mut self, map: &TestEntity) {
        self.server.on_map_save(&self.world, map);
    }

    pub fn take_events(&mut self) -> Events<TestEntity> {
        self.server.take_events()
    }
}
