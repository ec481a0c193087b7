//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.

use core::ops::Not;

/// Pin logic level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinLevel {
    /// Logic low (0).
    Low,
    /// Logic high (1).
    High,
}

impl From<bool> for PinLevel {
    fn from(value: bool) -> Self {
        if value {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> bool {
        matches!(level, PinLevel::High)
    }
}

impl Not for PinLevel {
    type Output = PinLevel;

    fn not(self) -> PinLevel {
        match self {
            PinLevel::Low => PinLevel::High,
            PinLevel::High => PinLevel::Low,
        }
    }
}

/// Functional role of a pin.
///
/// SoCs multiplex several peripheral functions onto most pins; those are all
/// reported as [`PinMode::Peripheral`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
    Peripheral,
}

/// GPIO controller trait.
///
/// Modes live in hardware only: every mode check re-reads the pin's
/// configuration register.
///
/// # Type Parameters
///
/// - `Pin`: Platform-specific pin identifier
/// - `Error`: Error type for operations that can fail
pub trait GpioController {
    /// Platform-specific pin identifier.
    type Pin: Copy;

    /// Error type for GPIO operations.
    type Error: core::fmt::Debug;

    /// Assign a mode to a pin without disturbing its neighbours.
    fn configure(&self, pin: Self::Pin, mode: PinMode) -> Result<(), Self::Error>;

    /// Current mode of a pin.
    fn mode(&self, pin: Self::Pin) -> Result<PinMode, Self::Error>;

    /// Drive an output pin. Fails unless the pin is configured as an output.
    fn write(&self, pin: Self::Pin, level: PinLevel) -> Result<(), Self::Error>;

    /// Sample an input pin. Fails unless the pin is configured as an input.
    fn read(&self, pin: Self::Pin) -> Result<PinLevel, Self::Error>;

    /// Level an output pin is currently driving.
    fn output_level(&self, pin: Self::Pin) -> Result<PinLevel, Self::Error>;

    /// Set a pin to logic high.
    fn set_high(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        self.write(pin, PinLevel::High)
    }

    /// Set a pin to logic low.
    fn set_low(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        self.write(pin, PinLevel::Low)
    }

    /// Invert the level an output pin is driving.
    fn toggle(&self, pin: Self::Pin) -> Result<(), Self::Error> {
        let level = self.output_level(pin)?;
        self.write(pin, !level)
    }
}
