//! MPU-6050 Register Definitions
//!
//! Based on the MPU-6000/MPU-6050 Register Map (RM-MPU-6000A-00 v4.2).
//! Only the registers the driver touches are listed.

// ============================================================================
// I2C Address
// ============================================================================

/// I2C address when AD0 pin is low
pub const MPU6050_ADDR: u8 = 0x68;

/// I2C address when AD0 pin is high
pub const MPU6050_ADDR_ALT: u8 = 0x69;

// ============================================================================
// Registers
// ============================================================================

/// Sample rate divider: SAMPLE_RATE = Gyro_Output_Rate / (1 + SMPLRT_DIV)
pub const SMPLRT_DIV: u8 = 0x19;

/// Configuration register (DLPF)
pub const CONFIG: u8 = 0x1A;

/// Gyroscope configuration (full-scale range)
pub const GYRO_CONFIG: u8 = 0x1B;

/// Accelerometer configuration (full-scale range)
pub const ACCEL_CONFIG: u8 = 0x1C;

/// First of 14 measurement bytes: accel XYZ, temperature, gyro XYZ
pub const ACCEL_XOUT_H: u8 = 0x3B;

/// Gyroscope measurements (high byte first)
pub const GYRO_XOUT_H: u8 = 0x43;

/// Power management 1
pub const PWR_MGMT_1: u8 = 0x6B;

/// Device ID
pub const WHO_AM_I: u8 = 0x75;

// ============================================================================
// Register Values
// ============================================================================

/// MPU-6050 WHO_AM_I value
pub const MPU6050_WHO_AM_I_VALUE: u8 = 0x68;

/// MPU-6500 WHO_AM_I value
pub const MPU6500_WHO_AM_I_VALUE: u8 = 0x70;

/// MPU-9250 WHO_AM_I value
pub const MPU9250_WHO_AM_I_VALUE: u8 = 0x71;

/// MPU-9255 WHO_AM_I value
pub const MPU9255_WHO_AM_I_VALUE: u8 = 0x73;

/// PWR_MGMT_1 bits
pub const PWR_MGMT_1_H_RESET: u8 = 0x80;
pub const PWR_MGMT_1_CLKSEL_PLL_X: u8 = 0x01;

/// DLPF 44 Hz accel / 42 Hz gyro, 1 kHz internal rate
pub const DLPF_CFG_42HZ: u8 = 0x03;

/// Internal sample rate with DLPF enabled (Hz)
pub const INTERNAL_RATE_HZ: u32 = 1000;

/// Burst length for accel + temp + gyro
pub const MEASUREMENT_LEN: usize = 14;

/// Temperature sensitivity and offset
pub const TEMP_SENSITIVITY: f32 = 340.0; // LSB/°C
pub const TEMP_OFFSET: f32 = 36.53; // °C at 0 LSB
