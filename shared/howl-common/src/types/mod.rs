//! Wire Types

pub mod command;
pub mod component;
pub mod interaction;
pub mod response;

pub use command::*;
pub use component::*;
pub use interaction::*;
pub use response::*;

/// Platform entity identifier, serialized as a string on the wire.
pub type Snowflake = String;
