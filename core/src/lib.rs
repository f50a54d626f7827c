#![no_std]

extern crate alloc;

pub use catalog::*;
pub use error::*;
pub use fit::*;
pub use reveal::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod catalog;
mod error;
mod fit;
mod reveal;
mod score;
mod session;
mod types;
