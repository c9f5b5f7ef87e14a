pub mod location;

pub use location::{LocationOutcome, LocationRequest};
