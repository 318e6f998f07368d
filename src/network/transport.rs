//! Transport
//!
//! Owns one connected stream socket: resolves the endpoint, connects, and
//! provides the read/write substrate the protocol layer runs on.

use std::io::{BufReader, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{LatticeError, Result};

/// A live, exclusively-owned connection to the server
///
/// Reads go through a buffer (the protocol reads a byte at a time); writes
/// go straight to the socket. Invalid after [`Transport::shutdown`].
pub struct Transport {
    /// Buffered read half
    reader: BufReader<TcpStream>,

    /// Write half (cloned handle onto the same socket)
    writer: TcpStream,

    /// Peer address for logging
    peer_addr: String,
}

impl Transport {
    /// Resolve the endpoint and connect
    ///
    /// Resolution may yield addresses of either family; each candidate is
    /// tried in order and the first successful connection wins. Exhausting
    /// all candidates yields a connect error carrying the last failure.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let endpoint = (config.host.as_str(), config.port);
        let candidates: Vec<SocketAddr> = endpoint
            .to_socket_addrs()
            .map_err(|e| {
                LatticeError::Resolution(format!(
                    "{}:{}: {}",
                    config.host, config.port, e
                ))
            })?
            .collect();

        if candidates.is_empty() {
            return Err(LatticeError::Resolution(format!(
                "{}:{}: no addresses found",
                config.host, config.port
            )));
        }

        let mut last_error = None;
        for addr in candidates {
            tracing::trace!(%addr, "trying candidate address");
            let attempt = if config.connect_timeout_ms > 0 {
                TcpStream::connect_timeout(
                    &addr,
                    Duration::from_millis(config.connect_timeout_ms),
                )
            } else {
                TcpStream::connect(addr)
            };

            match attempt {
                Ok(stream) => return Self::from_stream(stream, config),
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "candidate address failed");
                    last_error = Some(e);
                }
            }
        }

        let detail = match last_error {
            Some(e) => e.to_string(),
            None => "no candidate accepted the connection".to_string(),
        };
        Err(LatticeError::Connect(format!(
            "{}:{}: {}",
            config.host, config.port, detail
        )))
    }

    /// Wrap a connected stream, applying socket options and deadlines
    fn from_stream(stream: TcpStream, config: &ClientConfig) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone the stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!(peer = %peer_addr, "connected");

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: write_stream,
            peer_addr,
        })
    }

    /// Orderly shutdown of both directions
    ///
    /// Best-effort cleanup: a failure here is logged, never escalated, so
    /// teardown always makes progress.
    pub fn shutdown(&mut self) {
        if let Err(e) = self.writer.shutdown(Shutdown::Both) {
            tracing::debug!(peer = %self.peer_addr, error = %e, "socket shutdown failed");
        } else {
            tracing::debug!(peer = %self.peer_addr, "disconnected");
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

impl Read for Transport {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for Transport {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("peer_addr", &self.peer_addr)
            .finish()
    }
}
