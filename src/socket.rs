//! Collaborator-facing socket operations.
//!
//! Every function here is a thin wrapper over the raw syscall surface:
//! addresses are encoded before the call, caller-supplied buffer regions
//! are validated before they reach native I/O, and every failure comes
//! back as one structured [`NativeError`](crate::NativeError). Calls block
//! the current thread and are never retried; descriptors are plain
//! integers the caller owns until `close`.

use std::path::Path;

use crate::{
    addr::LocalSocketAddr,
    error::{NativeError, Result},
    platform::{types::*, PalLocalSocket, Sys},
};

/// Creates an unbound descriptor, e.g. `socket(PF_LOCAL, SOCK_STREAM, 0)`.
pub fn socket(domain: c_int, kind: c_int, protocol: c_int) -> Result<c_int> {
    trace_expr!(
        unsafe { Sys::socket(domain, kind, protocol) },
        "socket({}, {}, {})",
        domain,
        kind,
        protocol
    )
}

/// Binds `fd` to the filesystem path `path`.
pub fn bind(fd: c_int, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let addr = LocalSocketAddr::from_path(path)?;
    trace_expr!(
        unsafe { Sys::bind(fd, addr.as_ptr(), addr.len()) },
        "bind({}, {:?})",
        fd,
        path
    )
}

/// Marks a bound descriptor as passive.
pub fn listen(fd: c_int, backlog: c_int) -> Result<()> {
    trace_expr!(Sys::listen(fd, backlog), "listen({}, {})", fd, backlog)
}

/// Blocks until a peer connects to the listening `fd` and returns the new
/// connected descriptor. The listening descriptor is unchanged.
pub fn accept(fd: c_int) -> Result<c_int> {
    let mut peer = LocalSocketAddr::empty();
    let mut address_len = LocalSocketAddr::capacity();
    trace_expr!(
        unsafe { Sys::accept(fd, peer.as_mut_ptr(), &mut address_len) },
        "accept({})",
        fd
    )
}

/// Blocks until `fd` is connected to the listener at `path`.
pub fn connect(fd: c_int, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let addr = LocalSocketAddr::from_path(path)?;
    trace_expr!(
        unsafe { Sys::connect(fd, addr.as_ptr(), addr.len()) },
        "connect({}, {:?})",
        fd,
        path
    )
}

/// Blocking read into `buf[offset..offset + len]`. Ok(0) means the peer
/// shut its write side.
pub fn read(fd: c_int, buf: &mut [u8], offset: usize, len: usize) -> Result<usize> {
    check_region(buf.len(), offset, len)?;
    trace_expr!(
        unsafe { Sys::read(fd, buf.as_mut_ptr().add(offset).cast(), len) },
        "read({}, {} bytes at {})",
        fd,
        len,
        offset
    )
}

/// Blocking write of `buf[offset..offset + len]`. May write fewer than
/// `len` bytes; callers retry with the remainder.
pub fn write(fd: c_int, buf: &[u8], offset: usize, len: usize) -> Result<usize> {
    check_region(buf.len(), offset, len)?;
    trace_expr!(
        unsafe { Sys::write(fd, buf.as_ptr().add(offset).cast(), len) },
        "write({}, {} bytes at {})",
        fd,
        len,
        offset
    )
}

/// Releases the descriptor. A second close of the same descriptor surfaces
/// whatever the kernel reports, it is not suppressed here.
pub fn close(fd: c_int) -> Result<()> {
    trace_expr!(Sys::close(fd), "close({})", fd)
}

/// Half-closes a connected descriptor: `SHUT_RD`, `SHUT_WR` or `SHUT_RDWR`.
/// The descriptor itself stays open until [`close`].
pub fn shutdown(fd: c_int, how: c_int) -> Result<()> {
    trace_expr!(Sys::shutdown(fd, how), "shutdown({}, {})", fd, how)
}

/// Rejects a buffer region before it can reach a native call. An
/// out-of-range region handed to the kernel would be an out-of-bounds
/// access, not a recoverable I/O failure.
fn check_region(buffer_len: usize, offset: usize, len: usize) -> Result<()> {
    if offset >= buffer_len {
        return Err(NativeError::local(format!(
            "offset {offset} out of range for a buffer of {buffer_len} bytes"
        )));
    }
    match offset.checked_add(len) {
        Some(end) if end <= buffer_len => Ok(()),
        _ => Err(NativeError::local(format!(
            "{len} bytes at offset {offset} overrun a buffer of {buffer_len} bytes"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LOCAL_FAILURE;

    #[test]
    fn accepts_regions_inside_the_buffer() {
        assert!(check_region(8, 0, 8).is_ok());
        assert!(check_region(8, 7, 1).is_ok());
        assert!(check_region(8, 7, 0).is_ok());
        assert!(check_region(1, 0, 0).is_ok());
    }

    #[test]
    fn rejects_offset_at_or_past_the_end() {
        assert!(check_region(8, 8, 0).is_err());
        assert!(check_region(8, 9, 0).is_err());
        assert!(check_region(0, 0, 0).is_err());
    }

    #[test]
    fn rejects_regions_overrunning_the_buffer() {
        assert!(check_region(8, 4, 5).is_err());
        assert!(check_region(8, 0, 9).is_err());
        // offset + len must not wrap around
        assert!(check_region(8, 1, usize::MAX).is_err());
    }

    // An invalid descriptor never reaches the kernel: the guard fails
    // first, with the local code rather than EBADF.
    #[test]
    fn guard_runs_before_the_native_call() {
        let mut buf = [0u8; 8];
        let err = read(-1, &mut buf, 8, 1).unwrap_err();
        assert_eq!(err.code, LOCAL_FAILURE);
        let err = write(-1, &buf, 0, 9).unwrap_err();
        assert_eq!(err.code, LOCAL_FAILURE);
    }
}
