pub mod config_io;
pub mod item_io;
