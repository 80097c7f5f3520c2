/// Wire-level primitives of the chat link format: base64 transcoding and byte cursors.
pub mod base64;
mod de;
mod error;
mod ser;

pub use de::ByteReader;
pub use error::{Error, Result};
pub use ser::ByteWriter;
