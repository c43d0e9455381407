pub mod bidding;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

pub use bidding::*;
pub use error::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
