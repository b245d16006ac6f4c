/// Read-only view of the host that owns entity lifecycles, positions and
/// network addresses.
///
/// Partitions ("maps") are identified by entities, so `entity_map` returns
/// the same identifier type it is given.
pub trait WorldRefType<E> {
    // Entities
    /// check whether entity exists
    fn has_entity(&self, entity: &E) -> bool;

    /// The partition the entity currently resides in, or `None` if the entity
    /// is gone or has no position
    fn entity_map(&self, entity: &E) -> Option<E>;

    /// Whether the entity has finished initialization
    fn is_map_initialized(&self, entity: &E) -> bool;

    // Addressing
    /// Human-readable network address assigned by the transport layer
    fn device_address(&self, entity: &E) -> Option<String>;
}
