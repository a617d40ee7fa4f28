pub mod object_information;
pub mod satellites;
pub mod world_map;
