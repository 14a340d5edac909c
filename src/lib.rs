//! Direct, blocking bindings to the operating system's local-domain (Unix)
//! socket facility.
//!
//! The crate does three things and nothing more: encode a filesystem path
//! into the platform's binary socket address layout ([`addr`]), drive the
//! native socket lifecycle through single blocking syscalls ([`platform`],
//! [`socket`]), and translate every failure into one structured error
//! carrying the native code ([`error`]). Framing, pooling, retries and
//! event-driven I/O belong to the layers above.

#[cfg(not(unix))]
compile_error!("ipcsock binds the Unix-domain socket facility and only builds on unix targets");

#[macro_use]
mod macros;

pub mod addr;
pub mod constants;
pub mod error;
pub mod platform;
pub mod socket;

pub use self::{
    addr::LocalSocketAddr,
    error::{NativeError, Result, LOCAL_FAILURE},
};
