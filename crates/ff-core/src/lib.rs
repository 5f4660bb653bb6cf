pub mod error;
pub mod model;
pub mod result;
pub mod text;
pub mod types;

pub use error::{codes, ErrorKind, FormFlowError};
pub use model::*;
pub use result::*;
pub use text::*;
pub use types::*;
