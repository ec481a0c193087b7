use sunxi_mmio::{AccessFault, MapError};
use thiserror::Error;

use crate::pin::Pin;

pub type Result<T> = core::result::Result<T, GpioError>;

/// Errors that can occur when operating on GPIO pins.
#[derive(Debug, Error)]
pub enum GpioError {
    /// The memory device could not be opened.
    #[error("no access to the memory device, try running as root")]
    NoPrivilegedAccess(#[source] MapError),
    /// The kernel had no memory for the register mapping.
    #[error("out of memory while mapping the GPIO registers")]
    OutOfMemory(#[source] MapError),
    /// The register range could not be mapped.
    #[error("mapping the GPIO registers failed")]
    MapFailed(#[source] MapError),
    /// Called before `initialize` or after `cleanup`.
    #[error("GPIO controller is not initialized")]
    NotInitialized,
    /// Identifier names a bank past the last one.
    #[error("invalid pin identifier {0}")]
    InvalidPin(u32),
    /// Mode code is not input, output or peripheral.
    #[error("invalid mode {0}")]
    InvalidMode(u32),
    /// Level code is neither low nor high.
    #[error("invalid output state {0}")]
    InvalidLevel(u32),
    /// Write to a pin not configured as an output.
    #[error("{0} is not an output")]
    NotAnOutput(Pin),
    /// Read from a pin not configured as an input.
    #[error("{0} is not an input")]
    NotAnInput(Pin),
    /// A register read faulted.
    #[error("reading {pin} failed")]
    ReadFailure {
        pin: Pin,
        #[source]
        source: AccessFault,
    },
    /// A register write faulted.
    #[error("writing {pin} failed")]
    WriteFailure {
        pin: Pin,
        #[source]
        source: AccessFault,
    },
}

impl From<MapError> for GpioError {
    fn from(err: MapError) -> Self {
        match err {
            MapError::PermissionDenied { .. } => GpioError::NoPrivilegedAccess(err),
            MapError::OutOfMemory { .. } => GpioError::OutOfMemory(err),
            MapError::MapFailed { .. } => GpioError::MapFailed(err),
        }
    }
}

impl GpioError {
    /// Whether the error came from setting up the register window.
    pub fn is_setup(&self) -> bool {
        matches!(
            self,
            GpioError::NoPrivilegedAccess(_) | GpioError::OutOfMemory(_) | GpioError::MapFailed(_)
        )
    }

    /// Whether the error is a rejected call the caller can fix by
    /// reconfiguring the pin or passing a valid argument.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            GpioError::NotInitialized
                | GpioError::InvalidPin(_)
                | GpioError::InvalidMode(_)
                | GpioError::InvalidLevel(_)
                | GpioError::NotAnOutput(_)
                | GpioError::NotAnInput(_)
        )
    }

    pub(crate) fn read(pin: Pin, fault: AccessFault) -> Self {
        match fault {
            AccessFault::Closed => GpioError::NotInitialized,
            source => GpioError::ReadFailure { pin, source },
        }
    }

    pub(crate) fn write(pin: Pin, fault: AccessFault) -> Self {
        match fault {
            AccessFault::Closed => GpioError::NotInitialized,
            source => GpioError::WriteFailure { pin, source },
        }
    }
}
