use super::types::*;
use crate::{addr::sockaddr_local, error::Result};

/// The raw local-domain socket syscall surface.
///
/// Each method is a single direct, blocking invocation of the corresponding
/// native facility, returning the kernel's result or the thread's errno as a
/// structured error. No call is retried and no state is kept between calls;
/// descriptor lifecycle and cross-thread coordination belong to the caller.
///
/// The unsafe methods hand caller-supplied pointers to the kernel. Callers
/// must guarantee that `address` points to a live `sockaddr_local` of at
/// least `address_len` bytes, and that `buf` is valid for `count` bytes of
/// the required mutability.
pub trait PalLocalSocket {
    unsafe fn socket(domain: c_int, kind: c_int, protocol: c_int) -> Result<c_int>;

    unsafe fn bind(
        socket: c_int,
        address: *const sockaddr_local,
        address_len: socklen_t,
    ) -> Result<()>;

    fn listen(socket: c_int, backlog: c_int) -> Result<()>;

    /// Blocks until a peer connects. `address_len` is in/out: it supplies
    /// the buffer's allocated size and receives the size the kernel wrote.
    unsafe fn accept(
        socket: c_int,
        address: *mut sockaddr_local,
        address_len: *mut socklen_t,
    ) -> Result<c_int>;

    unsafe fn connect(
        socket: c_int,
        address: *const sockaddr_local,
        address_len: socklen_t,
    ) -> Result<()>;

    /// Ok(0) means the peer shut its write side.
    unsafe fn read(socket: c_int, buf: *mut c_void, count: size_t) -> Result<usize>;

    /// May write fewer than `count` bytes; the caller retries with the rest.
    unsafe fn write(socket: c_int, buf: *const c_void, count: size_t) -> Result<usize>;

    fn close(socket: c_int) -> Result<()>;

    fn shutdown(socket: c_int, how: c_int) -> Result<()>;
}
