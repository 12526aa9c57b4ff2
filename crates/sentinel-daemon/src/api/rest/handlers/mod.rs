//! API request handlers

mod dictionary;
mod health;
mod scan;

pub use dictionary::*;
pub use health::*;
pub use scan::*;
