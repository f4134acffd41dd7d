mod contact_details;
mod health_check;
mod send_email;

pub use contact_details::*;
pub use health_check::*;
pub use send_email::*;
