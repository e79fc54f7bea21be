mod blob;
mod element;
mod error;
mod range;

pub use blob::Blob;
pub use element::Element;
pub use error::{functions::*, BufferError, BufferErrorKind};
pub use range::Range;
