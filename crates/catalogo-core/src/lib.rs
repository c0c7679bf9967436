pub mod errors;
pub mod filter;
pub mod model;
pub mod util;

pub use errors::*;
pub use filter::*;
pub use model::*;
