use std::os::fd::{FromRawFd, OwnedFd};

use nix::{fcntl::OFlag, unistd};

/// An anonymous pipe. Both ends are close-on-exec so a child only ever holds
/// the end it was handed as stdin or stdout.
pub struct Pipe {
    pub reader: OwnedFd,
    pub writer: OwnedFd,
}

impl Pipe {
    pub fn new() -> nix::Result<Self> {
        let (reader, writer) = unistd::pipe2(OFlag::O_CLOEXEC)?;

        // SAFETY: both descriptors were just returned by pipe2(2) and are owned
        // by nothing else.
        let (reader, writer) = unsafe { (OwnedFd::from_raw_fd(reader), OwnedFd::from_raw_fd(writer)) };

        Ok(Self { reader, writer })
    }
}
