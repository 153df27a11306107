mod assessment;
mod common;
mod record;
mod response;
mod signal;
mod transaction;

pub use assessment::*;
pub use common::*;
pub use record::*;
pub use response::*;
pub use signal::*;
pub use transaction::*;
