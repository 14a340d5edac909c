//! End-to-end exercises of the blocking socket surface against a real
//! kernel, with socket paths under a fresh temporary directory.

use std::{path::PathBuf, thread};

use ipcsock::{
    constants::{PF_LOCAL, SHUT_WR, SOCK_STREAM},
    platform::types::c_int,
    socket, LOCAL_FAILURE,
};

fn stream_socket() -> c_int {
    socket::socket(PF_LOCAL, SOCK_STREAM, 0).expect("socket")
}

fn listener_at(path: &PathBuf) -> c_int {
    let fd = stream_socket();
    socket::bind(fd, path).expect("bind");
    socket::listen(fd, 1).expect("listen");
    fd
}

#[test]
fn written_bytes_arrive_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sock");
    let listener = listener_at(&path);

    let client = thread::spawn(move || {
        let fd = stream_socket();
        socket::connect(fd, &path).expect("connect");
        let payload = [0x5a_u8; 70_000];
        let mut sent = 0;
        while sent < payload.len() {
            // partial writes are expected once the kernel buffer fills
            sent += socket::write(fd, &payload, sent, payload.len() - sent).expect("write");
        }
        socket::close(fd).expect("close client");
        payload.len()
    });

    let conn = socket::accept(listener).expect("accept");
    let mut buf = [0u8; 4096];
    let len = buf.len();
    let mut total = 0;
    loop {
        let n = socket::read(conn, &mut buf, 0, len).expect("read");
        if n == 0 {
            break;
        }
        assert!(buf[..n].iter().all(|&b| b == 0x5a));
        total += n;
    }

    let sent = client.join().unwrap();
    assert_eq!(total, sent);
    socket::close(conn).unwrap();
    socket::close(listener).unwrap();
}

#[test]
fn write_to_a_closed_peer_is_a_native_error() {
    unsafe { libc::signal(libc::SIGPIPE, libc::SIG_IGN) };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sock");
    let listener = listener_at(&path);

    let accepter = thread::spawn(move || {
        let conn = socket::accept(listener).expect("accept");
        socket::close(conn).expect("close accepted");
    });

    let fd = stream_socket();
    socket::connect(fd, &path).expect("connect");
    accepter.join().unwrap();

    // the first write may still land in the kernel buffer
    let payload = [1u8; 64];
    let mut last = Ok(0);
    for _ in 0..32 {
        last = socket::write(fd, &payload, 0, payload.len());
        if last.is_err() {
            break;
        }
    }
    let err = last.unwrap_err();
    assert!(
        err.code == libc::EPIPE || err.code == libc::ECONNRESET,
        "expected a broken-pipe class errno, got {} ({})",
        err.code,
        err.message
    );

    socket::close(fd).unwrap();
    socket::close(listener).unwrap();
}

#[test]
fn shutdown_write_side_drains_to_end_of_stream() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.sock");
    let listener = listener_at(&path);

    let client = thread::spawn(move || {
        let fd = stream_socket();
        socket::connect(fd, &path).expect("connect");
        let mut sent = 0;
        while sent < 5 {
            sent += socket::write(fd, b"hello", sent, 5 - sent).expect("write");
        }
        socket::shutdown(fd, SHUT_WR).expect("shutdown");
        fd
    });

    let conn = socket::accept(listener).expect("accept");
    let mut buf = [0u8; 32];
    let len = buf.len();
    let mut received = Vec::new();
    loop {
        let n = socket::read(conn, &mut buf, 0, len).expect("read");
        if n == 0 {
            break;
        }
        received.extend_from_slice(&buf[..n]);
    }
    assert_eq!(received, b"hello");

    let fd = client.join().unwrap();
    socket::close(fd).unwrap();
    socket::close(conn).unwrap();
    socket::close(listener).unwrap();
}

#[test]
fn closing_twice_surfaces_the_kernel_error() {
    let fd = stream_socket();
    socket::close(fd).unwrap();
    let err = socket::close(fd).unwrap_err();
    assert_eq!(err.code, libc::EBADF);
    assert!(!err.is_local());
}

#[test]
fn local_and_native_failures_carry_distinct_codes() {
    let dir = tempfile::tempdir().unwrap();
    let fd = stream_socket();

    let long_name = format!("{}.sock", "x".repeat(200));
    let err = socket::bind(fd, dir.path().join(long_name)).unwrap_err();
    assert_eq!(err.code, LOCAL_FAILURE);

    let err = socket::connect(fd, dir.path().join("absent.sock")).unwrap_err();
    assert_eq!(err.code, libc::ENOENT);

    socket::close(fd).unwrap();
}
