// Reception domain module

#![allow(clippy::module_inception)]

pub mod reception;
pub mod value_objects;

pub use reception::Reception;
pub use value_objects::ReceptionStatus;
