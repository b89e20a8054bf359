//! Mock UART implementation for testing

use std::collections::VecDeque;

use crate::platform::{
    traits::{UartConfig, UartInterface},
    Result,
};

/// Mock UART implementation
///
/// In-memory transmit and receive buffers. Replies can be queued so that
/// each `write` call makes the next reply appear on the receive side,
/// which is how a modem answers a command.
#[derive(Debug, Default)]
pub struct MockUart {
    config: UartConfig,
    tx_buffer: Vec<u8>,
    rx_buffer: VecDeque<u8>,
    replies: VecDeque<Vec<u8>>,
    writes: usize,
}

impl MockUart {
    /// Create a new mock UART
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> Vec<u8> {
        self.tx_buffer.clone()
    }

    /// Transmitted data decoded as text
    pub fn tx_text(&self) -> String {
        String::from_utf8_lossy(&self.tx_buffer).into_owned()
    }

    /// Clear transmit buffer
    pub fn clear_tx_buffer(&mut self) {
        self.tx_buffer.clear();
    }

    /// Inject receive data immediately
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        self.rx_buffer.extend(data.iter().copied());
    }

    /// Queue a reply delivered after the next `write` call
    pub fn queue_reply(&mut self, reply: &[u8]) {
        self.replies.push_back(reply.to_vec());
    }

    /// Number of `write` calls so far
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Get current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.writes += 1;
        self.tx_buffer.extend_from_slice(data);
        if let Some(reply) = self.replies.pop_front() {
            self.rx_buffer.extend(reply);
        }
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let to_read = buffer.len().min(self.rx_buffer.len());
        for (slot, byte) in buffer.iter_mut().zip(self.rx_buffer.drain(..to_read)) {
            *slot = byte;
        }
        Ok(to_read)
    }

    fn available(&mut self) -> bool {
        !self.rx_buffer.is_empty()
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
