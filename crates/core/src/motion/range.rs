//! Full-scale range tables for the accelerometer and gyroscope.
//!
//! Each supported range carries its configuration register bits and its
//! raw-to-physical sensitivity. Unsupported ranges are rejected when the
//! enum is constructed, so conversion never has to handle an unknown key.

/// Unsupported full-scale range value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// Accelerometer range (g) not one of 2, 4, 8, 16
    UnsupportedAccel(u16),
    /// Gyroscope range (°/s) not one of 250, 500, 1000, 2000
    UnsupportedGyro(u16),
}

impl core::fmt::Display for RangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RangeError::UnsupportedAccel(g) => {
                write!(f, "unsupported accelerometer range ±{}g", g)
            }
            RangeError::UnsupportedGyro(dps) => {
                write!(f, "unsupported gyroscope range ±{}°/s", dps)
            }
        }
    }
}

// ============================================================================
// Accelerometer
// ============================================================================

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelRange {
    /// ±2g (16384 LSB/g)
    #[default]
    G2,
    /// ±4g (8192 LSB/g)
    G4,
    /// ±8g (4096 LSB/g)
    G8,
    /// ±16g (2048 LSB/g)
    G16,
}

impl AccelRange {
    /// Get ACCEL_CONFIG register value (FS_SEL in bits 4:3)
    pub const fn register_value(self) -> u8 {
        match self {
            AccelRange::G2 => 0x00,
            AccelRange::G4 => 0x08,
            AccelRange::G8 => 0x10,
            AccelRange::G16 => 0x18,
        }
    }

    /// Raw counts per g
    pub const fn sensitivity(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }

    /// Maximum measurable magnitude per axis (g)
    pub const fn full_scale(self) -> f32 {
        match self {
            AccelRange::G2 => 2.0,
            AccelRange::G4 => 4.0,
            AccelRange::G8 => 8.0,
            AccelRange::G16 => 16.0,
        }
    }

    /// Convert a raw register reading to g
    pub fn to_g(self, raw: i16) -> f32 {
        raw as f32 / self.sensitivity()
    }
}

impl TryFrom<u16> for AccelRange {
    type Error = RangeError;

    fn try_from(g: u16) -> Result<Self, Self::Error> {
        match g {
            2 => Ok(AccelRange::G2),
            4 => Ok(AccelRange::G4),
            8 => Ok(AccelRange::G8),
            16 => Ok(AccelRange::G16),
            other => Err(RangeError::UnsupportedAccel(other)),
        }
    }
}

// ============================================================================
// Gyroscope
// ============================================================================

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroRange {
    /// ±250 °/s (131 LSB/°/s)
    #[default]
    Dps250,
    /// ±500 °/s (65.5 LSB/°/s)
    Dps500,
    /// ±1000 °/s (32.8 LSB/°/s)
    Dps1000,
    /// ±2000 °/s (16.4 LSB/°/s)
    Dps2000,
}

impl GyroRange {
    /// Get GYRO_CONFIG register value (FS_SEL in bits 4:3)
    pub const fn register_value(self) -> u8 {
        match self {
            GyroRange::Dps250 => 0x00,
            GyroRange::Dps500 => 0x08,
            GyroRange::Dps1000 => 0x10,
            GyroRange::Dps2000 => 0x18,
        }
    }

    /// Raw counts per °/s
    pub const fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Dps250 => 131.0,
            GyroRange::Dps500 => 65.5,
            GyroRange::Dps1000 => 32.8,
            GyroRange::Dps2000 => 16.4,
        }
    }

    /// Maximum measurable rate per axis (°/s)
    pub const fn full_scale(self) -> f32 {
        match self {
            GyroRange::Dps250 => 250.0,
            GyroRange::Dps500 => 500.0,
            GyroRange::Dps1000 => 1000.0,
            GyroRange::Dps2000 => 2000.0,
        }
    }

    /// Convert a raw register reading to °/s
    pub fn to_dps(self, raw: i16) -> f32 {
        raw as f32 / self.sensitivity()
    }
}

impl TryFrom<u16> for GyroRange {
    type Error = RangeError;

    fn try_from(dps: u16) -> Result<Self, Self::Error> {
        match dps {
            250 => Ok(GyroRange::Dps250),
            500 => Ok(GyroRange::Dps500),
            1000 => Ok(GyroRange::Dps1000),
            2000 => Ok(GyroRange::Dps2000),
            other => Err(RangeError::UnsupportedGyro(other)),
        }
    }
}
