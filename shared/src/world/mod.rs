pub mod world_type;
