pub mod element;
pub mod greeting;
pub mod prediction;
pub mod symbol;

pub use element::*;
pub use greeting::*;
pub use prediction::*;
pub use symbol::*;
