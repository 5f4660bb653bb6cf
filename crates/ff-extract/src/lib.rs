pub mod branch;
pub mod choice;
pub mod conventions;
pub mod form;
pub mod question;
pub mod resolve;
pub mod section;

pub use branch::{BranchProbe, BranchShape, DestinationStrategy};
pub use choice::parse_choice;
pub use form::parse_form;
pub use question::parse_question;
pub use resolve::DestinationResolver;
pub use section::parse_section;
