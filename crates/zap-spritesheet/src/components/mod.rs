pub mod sequence;
pub mod sprite;
