pub mod atlas;
pub mod manifest;
pub mod registry;
pub mod slice;
