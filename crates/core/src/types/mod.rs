pub mod auction;
pub mod config;
pub mod fee;
pub mod primitives;
pub mod spec;

pub use auction::*;
pub use config::*;
pub use fee::*;
pub use primitives::*;
pub use spec::*;
