//! # Raw TCP Transport
//!
//! Network label printers accept ZPL on a raw TCP port (9100 by default).
//! There is no handshake and no response: the printer reads bytes until
//! the connection closes.
//!
//! Each job opens its own connection, writes the document and closes:
//!
//! ```text
//! connect (5 s timeout) ──► write_all(zpl) ──► flush ──► close
//! ```
//!
//! Large documents (embedded graphics) are written in chunks.

use std::io::Write;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use super::LabelSink;
use crate::error::LabelError;

/// Default raw printing port
pub const DEFAULT_PORT: u16 = 9100;

/// Connect timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Write timeout per chunk
const WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Chunk size for writes (bytes)
const CHUNK_SIZE: usize = 16 * 1024;

/// Parse `host` or `host:port`, defaulting to [`DEFAULT_PORT`].
///
/// ```
/// use labelzpl::transport::tcp::split_host_port;
///
/// assert_eq!(split_host_port("10.0.0.5"), ("10.0.0.5".to_string(), 9100));
/// assert_eq!(split_host_port("printer.lan:6101"), ("printer.lan".to_string(), 6101));
/// ```
pub fn split_host_port(target: &str) -> (String, u16) {
    if let Some((host, port)) = target.rsplit_once(':')
        && !host.contains(':')
        && let Ok(port) = port.parse()
    {
        return (host.to_string(), port);
    }
    (target.to_string(), DEFAULT_PORT)
}

/// # TCP Printer Sink
///
/// One-shot delivery to a network printer.
///
/// ```no_run
/// use labelzpl::transport::{LabelSink, TcpSink};
///
/// let mut sink = TcpSink::new("192.168.1.40");
/// sink.send("^XA^FO50,50^A0N,30,30^FDHello^FS^XZ")?;
/// # Ok::<(), labelzpl::error::LabelError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TcpSink {
    host: String,
    port: u16,
    connect_timeout: Duration,
}

impl TcpSink {
    /// Target `host` or `host:port`.
    pub fn new(target: &str) -> Self {
        let (host, port) = split_host_port(target);
        Self {
            host,
            port,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    /// Override the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    fn resolve(&self) -> Result<Vec<SocketAddr>, LabelError> {
        let addrs: Vec<SocketAddr> = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| {
                LabelError::Transport(format!("Failed to resolve {}: {}", self.host, e))
            })?
            .collect();
        if addrs.is_empty() {
            return Err(LabelError::Transport(format!(
                "No address for {}",
                self.host
            )));
        }
        Ok(addrs)
    }

    fn connect(&self) -> Result<TcpStream, LabelError> {
        let mut last_error = None;
        for addr in self.resolve()? {
            match TcpStream::connect_timeout(&addr, self.connect_timeout) {
                Ok(stream) => return Ok(stream),
                Err(e) => last_error = Some(e),
            }
        }
        Err(LabelError::Transport(format!(
            "Failed to connect to {}:{}: {}",
            self.host,
            self.port,
            last_error.map_or_else(|| "no address".to_string(), |e| e.to_string())
        )))
    }
}

impl LabelSink for TcpSink {
    fn send(&mut self, zpl: &str) -> Result<(), LabelError> {
        let mut stream = self.connect()?;
        stream
            .set_write_timeout(Some(WRITE_TIMEOUT))
            .map_err(|e| LabelError::Transport(format!("Socket setup failed: {}", e)))?;

        for chunk in zpl.as_bytes().chunks(CHUNK_SIZE) {
            stream
                .write_all(chunk)
                .map_err(|e| LabelError::Transport(format!("Write failed: {}", e)))?;
        }
        stream
            .flush()
            .map_err(|e| LabelError::Transport(format!("Flush failed: {}", e)))?;

        tracing::debug!(host = %self.host, port = self.port, bytes = zpl.len(), "sent label");
        Ok(())
    }
}
