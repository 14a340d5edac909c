use crate::platform::types::c_int;

pub const AF_LOCAL: c_int = 1;
pub const PF_LOCAL: c_int = 1;

pub const SOCK_STREAM: c_int = 1;

pub const SHUT_RD: c_int = 0;
pub const SHUT_WR: c_int = 1;
pub const SHUT_RDWR: c_int = 2;
