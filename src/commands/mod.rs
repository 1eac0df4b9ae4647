pub mod mute;
pub mod permissions;
pub mod sources;
pub mod updates;
