//! High-level terminal interface

use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, error, info, trace};

use pedlink_core::{decode_response, Frame, LRC_SIZE, RESPONSE_HEADER_SIZE};
use pedlink_transport::{TcpTransport, Transport};

use crate::error::{Error, Result};
use crate::observer::{ExchangeObserver, LogObserver};

/// Terminal connection settings
///
/// Fixed once the [`Terminal`] is built; reconnecting reuses the same
/// values.
#[derive(Debug, Clone)]
pub struct TerminalConfig {
    /// Terminal hostname or IP address
    pub host: String,

    /// Terminal TCP port
    pub port: u16,

    /// Name used to tag connection log lines
    pub service_name: String,

    /// Bound on the connect attempt; established exchanges block without
    /// limit
    pub connect_timeout: Option<Duration>,
}

impl TerminalConfig {
    /// Default bound on connect attempts
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a config with the default service name and connect timeout
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            service_name: "ped".to_string(),
            connect_timeout: Some(Self::DEFAULT_CONNECT_TIMEOUT),
        }
    }

    /// Set the service name used to tag log lines
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Set the connect timeout (`None` leaves the bound to the OS)
    pub fn with_connect_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// PED terminal client
///
/// High-level interface for blocking request/response exchanges with a
/// PIN-entry terminal. One exchange runs at a time; a failed exchange
/// leaves the connection closed and the caller decides whether to reconnect
/// and resend.
///
/// # Examples
///
/// ```no_run
/// use pedlink::{Terminal, TerminalConfig};
///
/// fn main() -> pedlink::Result<()> {
///     let config = TerminalConfig::new("192.168.1.50", 6001);
///     let mut terminal = Terminal::new(config);
///
///     terminal.connect()?;
///
///     let response = terminal.send_message(&["0200", "000000001000"], true)?;
///     println!("{:?}", response);
///
///     terminal.disconnect();
///     Ok(())
/// }
/// ```
pub struct Terminal {
    config: TerminalConfig,
    transport: Box<dyn Transport>,
    observer: Box<dyn ExchangeObserver>,
}

impl Terminal {
    /// Create a terminal client over TCP
    pub fn new(config: TerminalConfig) -> Self {
        let transport = TcpTransport::new(config.host.clone(), config.port)
            .with_connect_timeout(config.connect_timeout);

        Self::with_transport(config, Box::new(transport))
    }

    /// Create a terminal client over a caller-supplied transport
    pub fn with_transport(config: TerminalConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            observer: Box::new(LogObserver),
        }
    }

    /// Replace the exchange observer
    pub fn with_observer(mut self, observer: Box<dyn ExchangeObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Connection settings this client was built with
    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }

    /// Check if connected
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Connect to the terminal
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses the connection, the host is
    /// unreachable, or the connect timeout expires.
    pub fn connect(&mut self) -> Result<()> {
        self.transport.connect()?;

        info!(
            "[{}] Connected on [{}]",
            self.config.service_name,
            self.transport.remote_addr()
        );

        Ok(())
    }

    /// Disconnect from the terminal
    ///
    /// Idempotent; never fails.
    pub fn disconnect(&mut self) {
        if self.transport.is_connected() {
            self.transport.close();

            info!("[{}] Connection closed", self.config.service_name);
        }
    }

    /// Send a field list to the terminal and optionally wait for its reply
    ///
    /// Encodes `fields` into a single frame and writes it. With
    /// `wait_response` the call blocks until the terminal's framed reply
    /// arrives and returns its validated data; without it the call returns
    /// `None` as soon as the frame is written, performing no read.
    ///
    /// An encoding failure propagates before any network I/O and leaves the
    /// connection untouched. Every failure after that (write, read, length,
    /// checksum) closes the connection before the error is returned;
    /// reconnect before retrying.
    pub fn send_message<S: AsRef<str>>(
        &mut self,
        fields: &[S],
        wait_response: bool,
    ) -> Result<Option<Bytes>> {
        let frame = Frame::from_fields(fields)?;

        match self.exchange(&frame, wait_response) {
            Ok(response) => {
                if let Some(data) = &response {
                    self.observer.response_received(data);
                }

                Ok(response)
            }
            Err(err) => {
                error!(
                    "[{}] Exchange failed ({}), payload: {}",
                    self.config.service_name,
                    err,
                    hex::encode(frame.payload())
                );

                self.transport.close();
                self.observer.exchange_failed(&err);

                Err(err)
            }
        }
    }

    // Helper methods

    fn ensure_connected(&self) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(())
    }

    fn exchange(&mut self, frame: &Frame, wait_response: bool) -> Result<Option<Bytes>> {
        self.ensure_connected()?;

        trace!("Sending: {:?}", frame);

        self.transport.send(&frame.encode())?;
        self.observer.request_sent(frame.payload());

        if !wait_response {
            return Ok(None);
        }

        // 2 reserved bytes, then the big-endian data length
        let header_buf = self.transport.receive_exact(RESPONSE_HEADER_SIZE)?;
        let mut header = [0u8; RESPONSE_HEADER_SIZE];
        header.copy_from_slice(&header_buf);

        let declared = u16::from_be_bytes([header[2], header[3]]) as usize;
        let body = self.transport.receive_exact(declared + LRC_SIZE)?;

        trace!(
            header = format!("{:02X?}", header),
            body = hex::encode(&body),
            "Raw response"
        );

        let data = decode_response(header, body)?;

        debug!(
            "[{}] Validated {} response bytes",
            self.config.service_name,
            data.len()
        );

        Ok(Some(data))
    }
}
