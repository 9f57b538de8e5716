pub mod binding;
pub mod span;
pub mod types;

pub use binding::*;
pub use span::*;
pub use types::*;
