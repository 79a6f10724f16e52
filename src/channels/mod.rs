// Channel restructuring: splitting, standardization, bass relocation

pub mod bass;
pub mod split;
pub mod standardize;

pub use bass::relocate_bass;
pub use split::split_by_channel;
pub use standardize::standardize_channels;
