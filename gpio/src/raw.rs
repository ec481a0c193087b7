//! Integer-coded operations for binding layers.
//!
//! Pins are passed as their integer identifiers ([`Pin::id`]), modes and
//! levels as the hardware codes below. Arguments are validated before any
//! register is touched.

use crate::error::{GpioError, Result};
use crate::hal::gpio::{GpioController, PinLevel, PinMode};
use crate::hw::sun7i::gpio::Function;
use crate::pin::Pin;

pub const IN: u32 = Function::Input as u32;
pub const OUT: u32 = Function::Output as u32;
pub const PER: u32 = Function::Peripheral as u32;

pub const LOW: u32 = 0;
pub const HIGH: u32 = 1;

fn decode_mode(mode: u32) -> Result<PinMode> {
    match mode {
        IN => Ok(PinMode::Input),
        OUT => Ok(PinMode::Output),
        PER => Ok(PinMode::Peripheral),
        other => Err(GpioError::InvalidMode(other)),
    }
}

fn decode_level(level: u32) -> Result<PinLevel> {
    match level {
        LOW => Ok(PinLevel::Low),
        HIGH => Ok(PinLevel::High),
        other => Err(GpioError::InvalidLevel(other)),
    }
}

const fn encode_mode(mode: PinMode) -> u32 {
    match mode {
        PinMode::Input => IN,
        PinMode::Output => OUT,
        PinMode::Peripheral => PER,
    }
}

const fn encode_level(level: PinLevel) -> u32 {
    match level {
        PinLevel::Low => LOW,
        PinLevel::High => HIGH,
    }
}

pub fn set_mode<C>(gpio: &C, pin_id: u32, mode: u32) -> Result<()>
where
    C: GpioController<Pin = Pin, Error = GpioError>,
{
    let mode = decode_mode(mode)?;
    gpio.configure(Pin::from_id(pin_id)?, mode)
}

pub fn get_mode<C>(gpio: &C, pin_id: u32) -> Result<u32>
where
    C: GpioController<Pin = Pin, Error = GpioError>,
{
    gpio.mode(Pin::from_id(pin_id)?).map(encode_mode)
}

pub fn write<C>(gpio: &C, pin_id: u32, level: u32) -> Result<()>
where
    C: GpioController<Pin = Pin, Error = GpioError>,
{
    let level = decode_level(level)?;
    gpio.write(Pin::from_id(pin_id)?, level)
}

pub fn read<C>(gpio: &C, pin_id: u32) -> Result<u32>
where
    C: GpioController<Pin = Pin, Error = GpioError>,
{
    gpio.read(Pin::from_id(pin_id)?).map(encode_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::cubietruck::LED_BLUE;
    use crate::pins::PG3;
    use crate::platform::sun7i::Sun7iGpio;
    use sunxi_mmio::mock::MockMapper;

    fn controller() -> Sun7iGpio<MockMapper> {
        let gpio = Sun7iGpio::with_mapper(MockMapper::new());
        gpio.initialize().unwrap();
        gpio
    }

    #[test]
    fn codes_match_the_hardware_encoding() {
        assert_eq!((IN, OUT, PER), (0, 1, 2));
        assert_eq!((LOW, HIGH), (0, 1));
    }

    #[test]
    fn mode_codes_round_trip() {
        let gpio = controller();
        for mode in [IN, OUT, PER] {
            set_mode(&gpio, PG3.id(), mode).unwrap();
            assert_eq!(get_mode(&gpio, PG3.id()).unwrap(), mode);
        }
    }

    #[test]
    fn rejects_unknown_modes() {
        let gpio = controller();
        for mode in [3, 7, 15, u32::MAX] {
            assert!(matches!(
                set_mode(&gpio, PG3.id(), mode),
                Err(GpioError::InvalidMode(m)) if m == mode
            ));
        }
        assert_eq!(get_mode(&gpio, PG3.id()).unwrap(), IN);
    }

    #[test]
    fn rejects_unknown_levels_before_checking_mode() {
        let gpio = controller();
        set_mode(&gpio, LED_BLUE.id(), IN).unwrap();
        assert!(matches!(
            write(&gpio, LED_BLUE.id(), 2),
            Err(GpioError::InvalidLevel(2))
        ));
        assert!(matches!(
            write(&gpio, LED_BLUE.id(), HIGH),
            Err(GpioError::NotAnOutput(_))
        ));
    }

    #[test]
    fn rejects_unknown_pins() {
        let gpio = controller();
        assert!(matches!(
            set_mode(&gpio, 9 * 32, OUT),
            Err(GpioError::InvalidPin(288))
        ));
        assert!(matches!(read(&gpio, 1000), Err(GpioError::InvalidPin(1000))));
    }

    #[test]
    fn write_then_read_back() {
        let gpio = controller();
        set_mode(&gpio, LED_BLUE.id(), OUT).unwrap();
        write(&gpio, LED_BLUE.id(), HIGH).unwrap();
        assert!(matches!(
            read(&gpio, LED_BLUE.id()),
            Err(GpioError::NotAnInput(_))
        ));

        set_mode(&gpio, LED_BLUE.id(), IN).unwrap();
        assert_eq!(read(&gpio, LED_BLUE.id()).unwrap(), HIGH);
    }
}
