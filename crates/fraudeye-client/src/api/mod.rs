//! API endpoint modules.

mod ip;
mod phone;

pub use ip::{IpApi, IpLookupBuilder};
pub use phone::{PhoneApi, PhoneValidationBuilder};
