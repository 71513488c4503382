pub mod item;
pub mod family;
pub mod config;

pub use item::*;
pub use family::*;
pub use config::*;
