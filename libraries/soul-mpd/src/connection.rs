//! One open MPD session.

use crate::error::{MpdError, Result};
use crate::protocol::{self, Line, Pairs, GREETING_PREFIX};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

pub(crate) struct Connection {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl Connection {
    /// Connect, check the greeting, and authenticate if a password is set
    pub(crate) async fn open(address: &str, password: Option<&str>) -> Result<Self> {
        let stream = TcpStream::connect(address).await?;
        let (read, writer) = stream.into_split();
        let mut conn = Self {
            reader: BufReader::new(read),
            writer,
        };

        let greeting = conn.read_line().await?;
        let version = greeting
            .strip_prefix(GREETING_PREFIX)
            .ok_or_else(|| MpdError::Protocol(format!("Unexpected greeting: {greeting}")))?;
        debug!(address, version, "Connected to MPD");

        if let Some(password) = password {
            conn.execute(&protocol::command("password", &[password]))
                .await?;
        }

        Ok(conn)
    }

    /// Send one command and collect its response
    ///
    /// An `ACK` comes back as `Err(MpdError::Ack)`; the session stays usable.
    pub(crate) async fn execute(&mut self, command: &str) -> Result<Pairs> {
        self.writer.write_all(command.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;

        let mut pairs = Vec::new();
        loop {
            let line = self.read_line().await?;
            match protocol::parse_line(&line)? {
                Line::Pair(key, value) => pairs.push((key, value)),
                Line::Ok => return Ok(pairs),
                Line::Ack(err) => return Err(err),
            }
        }
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Err(MpdError::Closed);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}
