pub mod apply;
pub mod codegen;
pub mod init;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use codegen::{codegen, CodegenArgs};
pub use init::{init, InitArgs};
pub use validate::{validate, ValidateArgs};
