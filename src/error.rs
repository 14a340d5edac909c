use std::io;

use thiserror::Error;

use crate::platform::types::c_int;

/// Code carried by errors this layer raises itself, before any native call
/// is made (address construction failures, buffer bounds violations).
/// Kernel-reported errors always carry a positive errno, so the two kinds
/// are distinguishable through [`NativeError::code`] alone.
pub const LOCAL_FAILURE: c_int = -1;

/// Uniform error for every failed operation in this crate.
///
/// `code` is the OS-supplied errno for kernel-reported failures, or
/// [`LOCAL_FAILURE`] for failures raised locally. `message` carries the
/// OS error text verbatim in the former case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NativeError {
    pub code: c_int,
    pub message: String,
}

impl NativeError {
    /// Captures the calling thread's errno and its description.
    pub(crate) fn last_os() -> Self {
        let err = io::Error::last_os_error();
        Self {
            // last_os_error is always built from a raw errno value
            code: err.raw_os_error().unwrap_or_default(),
            message: err.to_string(),
        }
    }

    pub(crate) fn local(message: impl Into<String>) -> Self {
        Self {
            code: LOCAL_FAILURE,
            message: message.into(),
        }
    }

    /// True for errors raised by this layer itself rather than the kernel.
    pub fn is_local(&self) -> bool {
        self.code == LOCAL_FAILURE
    }
}

impl From<NativeError> for io::Error {
    fn from(err: NativeError) -> Self {
        if err.is_local() {
            io::Error::new(io::ErrorKind::InvalidInput, err.message)
        } else {
            io::Error::from_raw_os_error(err.code)
        }
    }
}

pub type Result<T, E = NativeError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_errors_carry_the_sentinel_code() {
        let err = NativeError::local("no room");
        assert_eq!(err.code, LOCAL_FAILURE);
        assert!(err.is_local());
        assert_eq!(err.to_string(), "no room");
    }

    #[test]
    fn native_codes_convert_to_io_errors() {
        let err = NativeError {
            code: libc::ENOENT,
            message: String::new(),
        };
        assert!(!err.is_local());
        let io_err = io::Error::from(err);
        assert_eq!(io_err.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn local_errors_convert_to_invalid_input() {
        let io_err = io::Error::from(NativeError::local("bad region"));
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(io_err.raw_os_error(), None);
    }
}
