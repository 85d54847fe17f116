//! Domain models
//!
//! - Catalog store entities: [`Product`], [`Category`]
//! - Ledger entities: [`Address`]

pub mod address;
pub mod category;
pub mod product;

pub use address::{Address, AddressCreate, AddressType, AddressUpdate};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use product::{Product, ProductCreate, ProductUpdate};
