mod error;
mod health_check;
mod subscriptions;
mod summary;

pub use error::*;
pub use health_check::*;
pub use subscriptions::*;
pub use summary::*;
