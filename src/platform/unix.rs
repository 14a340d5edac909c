use super::{types::*, PalLocalSocket};
use crate::{
    addr::sockaddr_local,
    error::{NativeError, Result},
};

fn e(result: c_int) -> Result<c_int> {
    if result == -1 {
        Err(NativeError::last_os())
    } else {
        Ok(result)
    }
}

fn e_len(result: ssize_t) -> Result<usize> {
    if result == -1 {
        Err(NativeError::last_os())
    } else {
        Ok(result as usize)
    }
}

pub struct Sys;

impl PalLocalSocket for Sys {
    unsafe fn socket(domain: c_int, kind: c_int, protocol: c_int) -> Result<c_int> {
        e(libc::socket(domain, kind, protocol))
    }

    unsafe fn bind(
        socket: c_int,
        address: *const sockaddr_local,
        address_len: socklen_t,
    ) -> Result<()> {
        e(libc::bind(socket, address.cast::<libc::sockaddr>(), address_len))?;
        Ok(())
    }

    fn listen(socket: c_int, backlog: c_int) -> Result<()> {
        e(unsafe { libc::listen(socket, backlog) })?;
        Ok(())
    }

    unsafe fn accept(
        socket: c_int,
        address: *mut sockaddr_local,
        address_len: *mut socklen_t,
    ) -> Result<c_int> {
        e(libc::accept(
            socket,
            address.cast::<libc::sockaddr>(),
            address_len,
        ))
    }

    unsafe fn connect(
        socket: c_int,
        address: *const sockaddr_local,
        address_len: socklen_t,
    ) -> Result<()> {
        e(libc::connect(
            socket,
            address.cast::<libc::sockaddr>(),
            address_len,
        ))?;
        Ok(())
    }

    unsafe fn read(socket: c_int, buf: *mut c_void, count: size_t) -> Result<usize> {
        e_len(libc::read(socket, buf, count))
    }

    unsafe fn write(socket: c_int, buf: *const c_void, count: size_t) -> Result<usize> {
        e_len(libc::write(socket, buf, count))
    }

    fn close(socket: c_int) -> Result<()> {
        e(unsafe { libc::close(socket) })?;
        Ok(())
    }

    fn shutdown(socket: c_int, how: c_int) -> Result<()> {
        e(unsafe { libc::shutdown(socket, how) })?;
        Ok(())
    }
}
