//! Encoding of filesystem paths into the kernel's local-socket address
//! structure.
//!
//! One logical address, two physical layouts: BSD-derived kernels expect a
//! one-byte structure length ahead of a one-byte family tag, everything
//! else a two-byte family tag alone. The layout is fixed at build time by
//! the target family, so an address built here always matches what the
//! running kernel will read or write.

use core::mem;
use std::{os::unix::ffi::OsStrExt, path::Path};

use memchr::memchr;

use crate::{
    constants::AF_LOCAL,
    error::{NativeError, Result},
    platform::types::*,
};

/// Bytes reserved for the path field, terminator included.
pub const SUN_PATH_CAP: usize = 104;

/// Longest encodable path: one byte of the field is kept for the
/// terminating zero.
pub const SUN_PATH_MAX: usize = SUN_PATH_CAP - 1;

/// Offset of the path field from the start of the structure. Identical on
/// both layouts: either a one-byte length plus a one-byte family, or a
/// single two-byte family tag.
pub const PATH_OFFSET: usize = 2;

/// Binary form of a local-domain socket address, length-prefixed layout.
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
#[repr(C)]
#[derive(Clone, Copy, Debug)]
#[allow(non_camel_case_types)]
pub struct sockaddr_local {
    pub sl_len: c_uchar,
    pub sl_family: c_uchar,
    pub sl_path: [c_char; SUN_PATH_CAP],
}

/// Binary form of a local-domain socket address, plain layout.
#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
)))]
#[repr(C)]
#[derive(Clone, Copy, Debug)]
#[allow(non_camel_case_types)]
pub struct sockaddr_local {
    pub sl_family: sa_family_t,
    pub sl_path: [c_char; SUN_PATH_CAP],
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
))]
fn write_header(addr: &mut sockaddr_local, path_len: usize) {
    addr.sl_len = (PATH_OFFSET + path_len) as c_uchar;
    addr.sl_family = AF_LOCAL as c_uchar;
}

#[cfg(not(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "dragonfly"
)))]
fn write_header(addr: &mut sockaddr_local, _path_len: usize) {
    addr.sl_family = AF_LOCAL as sa_family_t;
}

/// A fully encoded local socket address plus its logical size.
///
/// Built fresh for every `bind`, `connect` or `accept` call and immutable
/// once constructed; the logical size, not the reserved capacity, is what
/// `bind` and `connect` hand to the kernel.
#[derive(Debug)]
pub struct LocalSocketAddr {
    addr: sockaddr_local,
    len: socklen_t,
}

impl LocalSocketAddr {
    /// Encodes `path` into the platform layout.
    ///
    /// Fails locally, without touching the kernel, if the path's byte form
    /// does not fit the structure or contains an interior NUL byte (the
    /// kernel would silently truncate the address at that byte).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = path.as_os_str().as_bytes();
        if bytes.len() > SUN_PATH_MAX {
            return Err(NativeError::local(format!(
                "cannot fit path {path:?} in a local socket address (limit {SUN_PATH_MAX} bytes)"
            )));
        }
        if memchr(0, bytes).is_some() {
            return Err(NativeError::local(format!(
                "path {path:?} contains an interior NUL byte"
            )));
        }

        let mut addr: sockaddr_local = unsafe { mem::zeroed() };
        write_header(&mut addr, bytes.len());
        for (dst, src) in addr.sl_path.iter_mut().zip(bytes) {
            *dst = *src as c_char;
        }
        // the terminator at PATH_OFFSET + len is already zero

        Ok(Self {
            addr,
            len: (PATH_OFFSET + bytes.len() + 1) as socklen_t,
        })
    }

    /// A zero-filled address of the full fixed layout, for the kernel to
    /// write into on `accept`. The header is set; the logical size is the
    /// whole structure, since that is the capacity the kernel is offered.
    pub fn empty() -> Self {
        let mut addr: sockaddr_local = unsafe { mem::zeroed() };
        write_header(&mut addr, 0);
        Self {
            addr,
            len: Self::capacity(),
        }
    }

    /// The size in bytes passed to the kernel alongside this address.
    pub fn len(&self) -> socklen_t {
        self.len
    }

    /// The structure's full allocated size.
    pub fn capacity() -> socklen_t {
        mem::size_of::<sockaddr_local>() as socklen_t
    }

    /// The path bytes in use: everything before the first zero byte of the
    /// path field.
    pub fn path(&self) -> &[u8] {
        let field: &[u8] =
            unsafe { core::slice::from_raw_parts(self.addr.sl_path.as_ptr().cast(), SUN_PATH_CAP) };
        match memchr(0, field) {
            Some(end) => &field[..end],
            None => field,
        }
    }

    pub fn as_ptr(&self) -> *const sockaddr_local {
        &self.addr
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut sockaddr_local {
        &mut self.addr
    }
}
