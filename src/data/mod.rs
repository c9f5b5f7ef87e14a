pub mod listing;
pub mod places;
