//! # Printer Transport Layer
//!
//! Delivery of compiled documents to printers.
//!
//! ## Available Transports
//!
//! - [`tcp`]: raw TCP (port 9100) for networked printers
//! - [`MemorySink`]: collects documents in memory, for tests and dry runs

pub mod tcp;

pub use tcp::TcpSink;

use crate::error::LabelError;

/// Somewhere a compiled document can be sent.
pub trait LabelSink {
    /// Deliver one document.
    fn send(&mut self, zpl: &str) -> Result<(), LabelError>;

    /// Deliver documents in order, stopping at the first failure.
    fn send_all<'a>(&mut self, docs: impl IntoIterator<Item = &'a str>) -> Result<usize, LabelError>
    where
        Self: Sized,
    {
        let mut sent = 0;
        for doc in docs {
            self.send(doc)?;
            sent += 1;
        }
        Ok(sent)
    }
}

/// Keeps every document it is sent.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub sent: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LabelSink for MemorySink {
    fn send(&mut self, zpl: &str) -> Result<(), LabelError> {
        self.sent.push(zpl.to_string());
        Ok(())
    }
}
