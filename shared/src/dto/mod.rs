//! Data Transfer Objects for marketplace API communication.

pub mod error;
pub mod product;
pub mod transaction;
pub mod user;

pub use error::*;
pub use product::*;
pub use transaction::*;
pub use user::*;
