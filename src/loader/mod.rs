//! Loading of group lists and group details.

mod client;
mod parser;
mod source;
mod types;

pub use self::client::*;
pub use self::parser::*;
pub use self::source::*;
pub use self::types::*;
