pub mod error;
pub mod filesystem;
pub mod finders;
pub mod result;
pub mod visitor;

pub use error::*;
pub use filesystem::*;
pub use finders::*;
pub use result::*;
pub use visitor::*;
