pub mod cache;
pub mod clustering;
pub mod grid;
pub mod index;
pub mod projection;
pub mod visibility;
