mod contact_email;
mod outbound_message;
mod submission;

pub use contact_email::ContactEmail;
pub use outbound_message::OutboundMessage;
pub use submission::{Field, Submission, ValidationErrors};
