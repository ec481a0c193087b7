//! A20 GPIO Controller Driver

use log::{debug, warn};
use spin::Mutex;
use sunxi_mmio::{DevMem, Mapper, Offset, RegisterMap};

use crate::error::{GpioError, Result};
use crate::hal::gpio::{GpioController, PinLevel, PinMode};
use crate::hw::sun7i::gpio::{Function, PIO_BASE, PIO_LEN, config_field, data_bit};
use crate::pin::Pin;

/// A20 GPIO controller.
///
/// Owns the PIO register window between [`initialize`](Self::initialize) and
/// [`cleanup`](Self::cleanup). Every operation holds the window lock for its
/// whole read-modify-write, so a controller shared between threads never
/// loses an update to a neighbouring pin. Other processes or other
/// controllers mapping the same registers are not serialized.
///
/// Modes and levels are never cached; each call reads the hardware.
#[derive(Debug)]
pub struct Sun7iGpio<M: Mapper = DevMem> {
    mapper: M,
    window: Mutex<Option<M::Window>>,
}

impl Sun7iGpio<DevMem> {
    /// Controller mapping the registers through `/dev/mem`.
    pub fn new() -> Self {
        Self::with_mapper(DevMem::new())
    }
}

impl Default for Sun7iGpio<DevMem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Mapper> Sun7iGpio<M> {
    /// Controller mapping the registers through `mapper`.
    pub const fn with_mapper(mapper: M) -> Self {
        Self {
            mapper,
            window: Mutex::new(None),
        }
    }

    /// Mapper the register window is opened through.
    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Map the PIO registers.
    ///
    /// Re-initializing closes the previous window first. On failure the
    /// controller is left uninitialized.
    pub fn initialize(&self) -> Result<()> {
        let mut slot = self.window.lock();

        if let Some(mut stale) = slot.take() {
            warn!("GPIO controller re-initialized, closing the previous window");
            stale.close();
        }

        *slot = Some(self.mapper.open_window(PIO_BASE, PIO_LEN)?);
        debug!("GPIO controller initialized");
        Ok(())
    }

    /// Unmap the PIO registers. Safe to call at any time, any number of times.
    pub fn cleanup(&self) {
        if let Some(mut window) = self.window.lock().take() {
            window.close();
            debug!("GPIO controller cleaned up");
        }
    }

    /// Whether a live register window is held.
    pub fn is_initialized(&self) -> bool {
        self.window
            .lock()
            .as_ref()
            .is_some_and(|window| window.is_open())
    }

    fn with_window<T>(&self, f: impl FnOnce(&Registers<'_, M::Window>) -> Result<T>) -> Result<T> {
        let slot = self.window.lock();
        let window = slot.as_ref().ok_or(GpioError::NotInitialized)?;
        f(&Registers(window))
    }

    /// Raw 4-bit function code of a pin.
    pub fn function(&self, pin: Pin) -> Result<u32> {
        self.with_window(|regs| regs.function(pin))
    }

    /// Assign a mode to a pin, leaving the other seven pins sharing its
    /// configuration register untouched.
    pub fn configure(&self, pin: Pin, mode: PinMode) -> Result<()> {
        let field = config_field(pin);
        self.with_window(|regs| {
            let word = regs.load(pin, field.reg)?;
            regs.store(pin, field.reg, field.insert(word, Function::from(mode) as u32))
        })
    }

    /// Current mode of a pin. Every multiplexed function reads back as
    /// [`PinMode::Peripheral`].
    pub fn mode(&self, pin: Pin) -> Result<PinMode> {
        self.function(pin).map(Function::decode)
    }

    /// Drive an output pin.
    pub fn write(&self, pin: Pin, level: PinLevel) -> Result<()> {
        let bit = data_bit(pin);
        self.with_window(|regs| {
            regs.expect_mode(pin, PinMode::Output, GpioError::NotAnOutput(pin))?;
            let word = regs.load(pin, bit.reg)?;
            regs.store(pin, bit.reg, bit.apply(word, level.into()))
        })
    }

    /// Sample an input pin.
    pub fn read(&self, pin: Pin) -> Result<PinLevel> {
        self.with_window(|regs| {
            regs.expect_mode(pin, PinMode::Input, GpioError::NotAnInput(pin))?;
            regs.level(pin)
        })
    }

    /// Level an output pin is driving.
    pub fn output_level(&self, pin: Pin) -> Result<PinLevel> {
        self.with_window(|regs| {
            regs.expect_mode(pin, PinMode::Output, GpioError::NotAnOutput(pin))?;
            regs.level(pin)
        })
    }
}

/// Register accessors used while the window lock is held.
struct Registers<'a, W>(&'a W);

impl<W: RegisterMap> Registers<'_, W> {
    fn load(&self, pin: Pin, reg: Offset) -> Result<u32> {
        self.0
            .read_word(reg)
            .map_err(|fault| GpioError::read(pin, fault))
    }

    fn store(&self, pin: Pin, reg: Offset, value: u32) -> Result<()> {
        self.0
            .write_word(reg, value)
            .map_err(|fault| GpioError::write(pin, fault))
    }

    fn function(&self, pin: Pin) -> Result<u32> {
        let field = config_field(pin);
        Ok(field.extract(self.load(pin, field.reg)?))
    }

    fn expect_mode(&self, pin: Pin, mode: PinMode, mismatch: GpioError) -> Result<()> {
        if Function::decode(self.function(pin)?) == mode {
            Ok(())
        } else {
            Err(mismatch)
        }
    }

    fn level(&self, pin: Pin) -> Result<PinLevel> {
        let bit = data_bit(pin);
        Ok(bit.is_set(self.load(pin, bit.reg)?).into())
    }
}

impl<M: Mapper> GpioController for Sun7iGpio<M> {
    type Pin = Pin;
    type Error = GpioError;

    fn configure(&self, pin: Pin, mode: PinMode) -> Result<()> {
        Sun7iGpio::configure(self, pin, mode)
    }

    fn mode(&self, pin: Pin) -> Result<PinMode> {
        Sun7iGpio::mode(self, pin)
    }

    fn write(&self, pin: Pin, level: PinLevel) -> Result<()> {
        Sun7iGpio::write(self, pin, level)
    }

    fn read(&self, pin: Pin) -> Result<PinLevel> {
        Sun7iGpio::read(self, pin)
    }

    fn output_level(&self, pin: Pin) -> Result<PinLevel> {
        Sun7iGpio::output_level(self, pin)
    }
}
