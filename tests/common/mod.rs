use std::{
    io::{self, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use mysh::{config::Config, session::Session};

/// A cloneable in-memory writer so tests can read back what the session wrote.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub struct Harness {
    pub session: Session,
    pub stdout: SharedBuffer,
    pub stderr: SharedBuffer,
}

pub fn session_in(dir: &Path) -> Harness {
    let stdout = SharedBuffer::default();
    let stderr = SharedBuffer::default();
    let session = Session::with_output(
        Config::default(),
        dir.canonicalize().unwrap(),
        Box::new(stdout.clone()),
        Box::new(stderr.clone()),
    );

    Harness {
        session,
        stdout,
        stderr,
    }
}
