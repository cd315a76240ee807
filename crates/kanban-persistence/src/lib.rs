pub mod serialization;
pub mod store;
pub mod traits;

pub use serialization::*;
pub use store::*;
pub use traits::*;
