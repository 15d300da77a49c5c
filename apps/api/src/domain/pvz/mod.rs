// PVZ domain module
// Pickup points, the listing view, and listing inputs

#![allow(clippy::module_inception)]

pub mod listing;
pub mod pvz;
pub mod value_objects;

pub use listing::{DateWindow, PageRequest};
pub use pvz::{ExtendedPvz, ExtendedReception, Pvz};
pub use value_objects::City;
