pub mod classify;
pub mod selection;
pub mod shared;
