pub use self::pal::PalLocalSocket;

mod pal;

pub use self::sys::Sys;

#[cfg(unix)]
#[path = "unix.rs"]
mod sys;

pub mod types;
