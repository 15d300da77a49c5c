// Product domain module

#![allow(clippy::module_inception)]

pub mod product;
pub mod value_objects;

pub use product::Product;
pub use value_objects::ProductType;
