//! Allwinner A20 (sun7i) PIO register layout.
//!
//! Every port bank owns a block of nine 32-bit registers:
//!
//! ```text
//! +0x00  CFG0   function select, pins 0-7
//! +0x04  CFG1   function select, pins 8-15
//! +0x08  CFG2   function select, pins 16-23
//! +0x0C  CFG3   function select, pins 24-31
//! +0x10  DAT    one data bit per pin
//! +0x14  DRV0   drive strength, pins 0-15
//! +0x18  DRV1   drive strength, pins 16-31
//! +0x1C  PULL0  pull-up/down, pins 0-15
//! +0x20  PULL1  pull-up/down, pins 16-31
//! ```
//!
//! Bank blocks are packed back to back from the PIO base, bank A first.

use sunxi_mmio::Offset;

use crate::hal::gpio::PinMode;
use crate::pin::{Bank, PINS_PER_BANK, Pin};

/// Physical base address of the PIO controller.
pub const PIO_BASE: usize = 0x01C2_0800;

/// Length of the PIO register region.
pub const PIO_LEN: usize = 0x400;

/// Distance between consecutive bank blocks.
pub const BANK_STRIDE: u32 = 0x24;

/// Offset of each bank block from [`PIO_BASE`], indexed by [`Bank`].
pub const BANK_OFFSETS: [u32; Bank::ALL.len()] = [
    0x000, // A
    0x024, // B
    0x048, // C
    0x06C, // D
    0x090, // E
    0x0B4, // F
    0x0D8, // G
    0x0FC, // H
    0x120, // I
];

/// First function-select register within a bank block.
pub const CFG0: u32 = 0x00;

/// Data register within a bank block.
pub const DAT: u32 = 0x10;

/// Pins sharing one function-select register.
pub const PINS_PER_CFG: u8 = 8;

/// Width of a pin's function field.
pub const FIELD_BITS: u32 = 4;

/// Mask of a function field at shift zero.
pub const FIELD_MASK: u32 = (1 << FIELD_BITS) - 1;

/// Writable function codes.
///
/// Codes 2-6 select one of the pin's multiplexed peripherals and 7 disables
/// the pin. This driver only ever writes [`Function::Peripheral`].
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Function {
    Input = 0b000,
    Output = 0b001,
    Peripheral = 0b010,
}

impl Function {
    /// Classify a raw function code read back from hardware.
    pub const fn decode(code: u32) -> PinMode {
        match code {
            0 => PinMode::Input,
            1 => PinMode::Output,
            _ => PinMode::Peripheral,
        }
    }
}

impl From<PinMode> for Function {
    fn from(mode: PinMode) -> Self {
        match mode {
            PinMode::Input => Function::Input,
            PinMode::Output => Function::Output,
            PinMode::Peripheral => Function::Peripheral,
        }
    }
}

/// Location of a pin's function field.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConfigField {
    /// Function-select register holding the field.
    pub reg: Offset,
    /// Bit position of the field's least significant bit.
    pub shift: u32,
}

impl ConfigField {
    pub const fn mask(self) -> u32 {
        FIELD_MASK << self.shift
    }

    /// Function code stored in `word`.
    pub const fn extract(self, word: u32) -> u32 {
        (word & self.mask()) >> self.shift
    }

    /// `word` with this field replaced by `code`.
    pub const fn insert(self, word: u32, code: u32) -> u32 {
        (word & !self.mask()) | ((code & FIELD_MASK) << self.shift)
    }
}

/// Location of a pin's bit in its bank's data register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DataBit {
    pub reg: Offset,
    pub mask: u32,
}

impl DataBit {
    /// `word` with this bit driven to `high`.
    pub const fn apply(self, word: u32, high: bool) -> u32 {
        if high {
            word | self.mask
        } else {
            word & !self.mask
        }
    }

    pub const fn is_set(self, word: u32) -> bool {
        word & self.mask != 0
    }
}

const fn bank_reg(bank: Bank, reg: u32) -> Offset {
    Offset::from_words((BANK_OFFSETS[bank.index()] + reg) / 4)
}

/// Function field of `pin`.
pub const fn config_field(pin: Pin) -> ConfigField {
    let cfg = (pin.index() / PINS_PER_CFG) as u32;
    ConfigField {
        reg: bank_reg(pin.bank(), CFG0 + cfg * 4),
        shift: (pin.index() % PINS_PER_CFG) as u32 * FIELD_BITS,
    }
}

/// Data bit of `pin`.
pub const fn data_bit(pin: Pin) -> DataBit {
    DataBit {
        reg: bank_reg(pin.bank(), DAT),
        mask: 1 << (pin.index() % PINS_PER_BANK),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_table_follows_stride() {
        for (i, offset) in BANK_OFFSETS.iter().enumerate() {
            assert_eq!(*offset, i as u32 * BANK_STRIDE);
        }
        let last = BANK_OFFSETS[Bank::I.index()] + BANK_STRIDE;
        assert!(last as usize <= PIO_LEN);
    }

    #[test]
    fn config_field_location() {
        let field = config_field(Pin::new(Bank::H, 21));
        assert_eq!(field.reg.bytes(), 0x0FC + 0x08);
        assert_eq!(field.shift, 20);
        assert_eq!(field.mask(), 0x00F0_0000);

        let field = config_field(Pin::new(Bank::B, 7));
        assert_eq!(field.reg.bytes(), 0x024);
        assert_eq!(field.shift, 28);
    }

    #[test]
    fn data_bit_location() {
        let bit = data_bit(Pin::new(Bank::G, 11));
        assert_eq!(bit.reg.bytes(), 0x0D8 + 0x10);
        assert_eq!(bit.mask, 1 << 11);
        assert!(bit.is_set(bit.apply(0, true)));
        assert_eq!(bit.apply(u32::MAX, false), !(1 << 11));
    }

    #[test]
    fn insert_only_touches_its_field() {
        let field = config_field(Pin::new(Bank::C, 3));
        let word = field.insert(0x7777_7777, Function::Output as u32);
        assert_eq!(word, 0x7777_1777);
        assert_eq!(field.extract(word), 1);
    }

    #[test]
    fn unknown_codes_decode_as_peripheral() {
        assert_eq!(Function::decode(0), PinMode::Input);
        assert_eq!(Function::decode(1), PinMode::Output);
        for code in 2..=7 {
            assert_eq!(Function::decode(code), PinMode::Peripheral);
        }
    }
}
