//! Memory-mapped GPIO control for Allwinner A20 (sun7i) boards.
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent pin vocabulary and controller trait
//! - [`hw`]: Register layouts (offsets, field positions, function codes)
//! - [`platform`]: SoC controllers built on a mapped register window
//! - [`pins`]: Named pins of the reference board
//! - [`raw`]: Integer-coded operations for binding layers
//!
//! # Usage Example
//!
//! ```no_run
//! use sunxi_gpio::pins::cubietruck::LED_BLUE;
//! use sunxi_gpio::{Gpio, PinLevel, PinMode};
//!
//! let gpio = Gpio::new();
//! gpio.initialize()?;
//! gpio.configure(LED_BLUE, PinMode::Output)?;
//! gpio.write(LED_BLUE, PinLevel::High)?;
//! gpio.cleanup();
//! # Ok::<(), sunxi_gpio::GpioError>(())
//! ```
//!
//! The register window is released by [`Gpio::cleanup`], when the
//! controller is dropped, or at the latest when the process exits.

pub mod error;
pub mod hal;
pub mod hw;
mod pin;
pub mod pins;
pub mod platform;
#[cfg(feature = "sun7i")]
pub mod raw;

pub use error::{GpioError, Result};
pub use hal::gpio::{GpioController, PinLevel, PinMode};
pub use pin::{Bank, PINS_PER_BANK, Pin};
pub use platform::Gpio;
