pub mod animation;
pub mod playback;
