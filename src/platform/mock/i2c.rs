//! Mock I2C implementation for testing

use std::collections::VecDeque;

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::I2cInterface,
    Result,
};

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write { addr: u8, data: Vec<u8> },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification. Read data is served
/// from a FIFO queue; missing bytes read as zero. Failures can be
/// injected for the next N transactions.
#[derive(Debug, Default)]
pub struct MockI2c {
    transactions: Vec<I2cTransaction>,
    read_data: VecDeque<u8>,
    failures: u32,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> Vec<I2cTransaction> {
        self.transactions.clone()
    }

    /// Clear transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Append data returned by subsequent reads
    pub fn queue_read_data(&mut self, data: &[u8]) {
        self.read_data.extend(data.iter().copied());
    }

    /// Make the next `count` transactions fail with a bus error
    pub fn fail_next(&mut self, count: u32) {
        self.failures = count;
    }

    fn check_failure(&mut self) -> Result<()> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(PlatformError::I2c(I2cError::BusError));
        }
        Ok(())
    }

    fn fill(&mut self, buffer: &mut [u8]) {
        for slot in buffer.iter_mut() {
            *slot = self.read_data.pop_front().unwrap_or(0);
        }
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Write {
            addr,
            data: data.to_vec(),
        });
        self.check_failure()
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });
        self.check_failure()?;
        self.fill(buffer);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });
        self.check_failure()?;
        self.fill(read_buffer);
        Ok(())
    }
}
