//! # pedlink
//!
//! Synchronous client for PIN-entry payment terminals (PEDs) speaking the
//! framed, LRC-checksummed "V2" wire protocol over TCP.
//!
//! ## Features
//!
//! - Bit-exact frame encoding and response validation
//! - Blocking request/response exchanges over a dedicated connection
//! - Connection lifecycle with bounded connect timeout
//! - Pluggable exchange observer for payload-level records
//!
//! ## Quick Start
//!
//! ```no_run
//! use pedlink::{Terminal, TerminalConfig};
//!
//! fn main() -> pedlink::Result<()> {
//!     // Connect to terminal
//!     let config = TerminalConfig::new("192.168.1.50", 6001);
//!     let mut terminal = Terminal::new(config);
//!     terminal.connect()?;
//!
//!     // One request/response exchange
//!     let response = terminal.send_message(&["0200", "000000001000"], true)?;
//!     println!("{:?}", response);
//!
//!     // Disconnect
//!     terminal.disconnect();
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod observer;
pub mod terminal;

// Re-exports
pub use error::{Error, Result};
pub use observer::{ExchangeObserver, LogObserver, NoopObserver};
pub use terminal::{Terminal, TerminalConfig};

// Re-export protocol types
pub use pedlink_core::Frame;
pub use pedlink_transport::{TcpTransport, Transport};
