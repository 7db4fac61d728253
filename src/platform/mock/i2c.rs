//! Mock I2C implementation for testing

use crate::platform::{
    error::I2cError,
    traits::{I2cConfig, I2cInterface},
    PlatformError, Result,
};
use heapless::Vec;

/// Transactions retained in the log
const TRANSACTION_LOG_SIZE: usize = 32;

/// Bytes captured per write transaction
const WRITE_CAPTURE_SIZE: usize = 16;

/// Pre-programmed read data capacity
const READ_DATA_SIZE: usize = 64;

/// I2C transaction record for test verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cTransaction {
    /// Write transaction
    Write {
        addr: u8,
        data: Vec<u8, WRITE_CAPTURE_SIZE>,
    },
    /// Read transaction
    Read { addr: u8, len: usize },
    /// Write-Read transaction
    WriteRead {
        addr: u8,
        write_data: Vec<u8, WRITE_CAPTURE_SIZE>,
        read_len: usize,
    },
}

/// Mock I2C implementation
///
/// Records all transactions for test verification, returns pre-programmed
/// read data, and can be switched into a non-acknowledging state to exercise
/// bus failure paths.
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    transactions: Vec<I2cTransaction, TRANSACTION_LOG_SIZE>,
    read_data: Vec<u8, READ_DATA_SIZE>,
    read_pos: usize,
    nack: bool,
}

impl MockI2c {
    /// Create a new mock I2C
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            transactions: Vec::new(),
            read_data: Vec::new(),
            read_pos: 0,
            nack: false,
        }
    }

    /// Transaction log, in issue order
    pub fn transactions(&self) -> &[I2cTransaction] {
        &self.transactions
    }

    /// Clear the transaction log
    pub fn clear_transactions(&mut self) {
        self.transactions.clear();
    }

    /// Set the data served to subsequent read operations
    pub fn set_read_data(&mut self, data: &[u8]) {
        self.read_data.clear();
        self.read_pos = 0;
        let _ = self.read_data.extend_from_slice(data);
    }

    /// Make every transaction fail with a NACK
    pub fn set_nack(&mut self, nack: bool) {
        self.nack = nack;
    }

    /// Configured bus frequency
    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn check_ack(&self) -> Result<()> {
        if self.nack {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        Ok(())
    }

    fn serve_read(&mut self, buffer: &mut [u8]) {
        let available = &self.read_data[self.read_pos..];
        let to_read = core::cmp::min(buffer.len(), available.len());
        buffer[..to_read].copy_from_slice(&available[..to_read]);
        self.read_pos += to_read;
    }

    fn capture(data: &[u8]) -> Vec<u8, WRITE_CAPTURE_SIZE> {
        let mut captured = Vec::new();
        let take = core::cmp::min(data.len(), WRITE_CAPTURE_SIZE);
        let _ = captured.extend_from_slice(&data[..take]);
        captured
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.check_ack()?;
        let _ = self.transactions.push(I2cTransaction::Write {
            addr,
            data: Self::capture(data),
        });
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.check_ack()?;
        let _ = self.transactions.push(I2cTransaction::Read {
            addr,
            len: buffer.len(),
        });
        self.serve_read(buffer);
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.check_ack()?;
        let _ = self.transactions.push(I2cTransaction::WriteRead {
            addr,
            write_data: Self::capture(write_data),
            read_len: read_buffer.len(),
        });
        self.serve_read(read_buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_i2c_write() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.write(0x42, &[0x01, 0x02, 0x03]).unwrap();

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        match &transactions[0] {
            I2cTransaction::Write { addr, data } => {
                assert_eq!(*addr, 0x42);
                assert_eq!(data.as_slice(), &[0x01, 0x02, 0x03]);
            }
            other => panic!("unexpected transaction: {:?}", other),
        }
    }

    #[test]
    fn test_mock_i2c_read_serves_programmed_data() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_read_data(&[0xAA, 0xBB, 0xCC]);

        let mut buffer = [0u8; 2];
        i2c.read(0x42, &mut buffer).unwrap();
        assert_eq!(buffer, [0xAA, 0xBB]);

        // Next read continues where the previous one stopped
        let mut rest = [0u8; 2];
        i2c.read(0x42, &mut rest).unwrap();
        assert_eq!(rest, [0xCC, 0x00]);
    }

    #[test]
    fn test_mock_i2c_write_read() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_read_data(&[0x12, 0x34]);

        let mut read_buf = [0u8; 2];
        i2c.write_read(0x42, &[0xFD], &mut read_buf).unwrap();
        assert_eq!(read_buf, [0x12, 0x34]);

        let transactions = i2c.transactions();
        assert_eq!(transactions.len(), 1);
        match &transactions[0] {
            I2cTransaction::WriteRead {
                addr,
                write_data,
                read_len,
            } => {
                assert_eq!(*addr, 0x42);
                assert_eq!(write_data.as_slice(), &[0xFD]);
                assert_eq!(*read_len, 2);
            }
            other => panic!("unexpected transaction: {:?}", other),
        }
    }

    #[test]
    fn test_mock_i2c_default_frequency() {
        let i2c = MockI2c::new(I2cConfig::default());
        assert_eq!(i2c.frequency(), 100_000);
    }

    #[test]
    fn test_mock_i2c_nack_fails_every_transaction() {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_nack(true);

        let mut buffer = [0u8; 1];
        assert_eq!(
            i2c.read(0x42, &mut buffer),
            Err(PlatformError::I2c(I2cError::Nack))
        );
        assert_eq!(
            i2c.write(0x42, &[0x00]),
            Err(PlatformError::I2c(I2cError::Nack))
        );
        // Nothing is logged for rejected transactions
        assert!(i2c.transactions().is_empty());
    }
}
