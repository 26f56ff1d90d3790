use std::{io, path::Path};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Where the session gets its lines from: the terminal, piped stdin or a
/// batch file.
pub struct LineSource {
    reader: BufReader<Box<dyn AsyncRead + Unpin + Send>>,
}

impl LineSource {
    pub fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = tokio::fs::File::open(path).await?;
        Ok(Self::from_reader(file))
    }

    pub fn from_reader(reader: impl AsyncRead + Unpin + Send + 'static) -> Self {
        Self {
            reader: BufReader::new(Box::new(reader)),
        }
    }

    /// Next line including its newline, or `None` at end of input. Invalid
    /// UTF-8 is replaced rather than ending the session.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf).await? {
            0 => Ok(None),
            _ => Ok(Some(String::from_utf8_lossy(&buf).into_owned())),
        }
    }
}
