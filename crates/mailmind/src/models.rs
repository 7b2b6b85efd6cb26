pub mod action;
pub mod category;
pub mod draft;
pub mod email;
pub mod response;

pub use action::ActionItem;
pub use category::Category;
pub use draft::{Draft, DraftRecord};
pub use email::Email;
pub use response::{ActionOutput, AgentResponse};
