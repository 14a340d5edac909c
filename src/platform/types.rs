//! C scalar types used at the FFI boundary, as the host libc defines them.

pub use libc::{c_char, c_int, c_uchar, c_void, sa_family_t, size_t, socklen_t, ssize_t};
