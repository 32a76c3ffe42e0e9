//! Receipt domain: money, the service record, withholding rules and the ports
//! the application layer talks to.

pub mod format;
pub mod money;
pub mod ports;
pub mod record;
pub mod tax;
