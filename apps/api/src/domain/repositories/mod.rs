// Repository interfaces (ports)
// Implemented by infrastructure transaction handles

pub mod product_repository;
pub mod pvz_repository;
pub mod reception_repository;
pub mod store;
pub mod user_repository;

pub use product_repository::ProductRepository;
pub use pvz_repository::PvzRepository;
pub use reception_repository::ReceptionRepository;
pub use store::{with_transaction, Store, StoreTransaction};
pub use user_repository::UserRepository;
