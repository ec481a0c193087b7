//! Pin identifiers.

use core::fmt;

use crate::error::GpioError;

/// Number of pins addressable in one bank.
pub const PINS_PER_BANK: u8 = 32;

/// GPIO port bank.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bank {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
}

impl Bank {
    pub const ALL: [Bank; 9] = [
        Bank::A,
        Bank::B,
        Bank::C,
        Bank::D,
        Bank::E,
        Bank::F,
        Bank::G,
        Bank::H,
        Bank::I,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_index(index: usize) -> Option<Bank> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// Datasheet letter of the bank.
    pub const fn letter(self) -> char {
        (b'A' + self as u8) as char
    }
}

/// A single GPIO pin: a bank and a pin number within it.
///
/// The integer identifier is `bank * 32 + index`, matching the numbering the
/// vendor kernel uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pin {
    bank: Bank,
    index: u8,
}

impl Pin {
    /// Create a pin.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 32 or more. In constant contexts this is a
    /// compile error.
    pub const fn new(bank: Bank, index: u8) -> Self {
        assert!(index < PINS_PER_BANK, "pin index out of range");
        Self { bank, index }
    }

    /// Decode an integer identifier.
    pub fn from_id(id: u32) -> Result<Pin, GpioError> {
        let bank = Bank::from_index((id / PINS_PER_BANK as u32) as usize)
            .ok_or(GpioError::InvalidPin(id))?;
        Ok(Pin {
            bank,
            index: (id % PINS_PER_BANK as u32) as u8,
        })
    }

    pub const fn bank(self) -> Bank {
        self.bank
    }

    pub const fn index(self) -> u8 {
        self.index
    }

    /// Integer identifier of the pin.
    pub const fn id(self) -> u32 {
        self.bank as u32 * PINS_PER_BANK as u32 + self.index as u32
    }
}

impl TryFrom<u32> for Pin {
    type Error = GpioError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Pin::from_id(id)
    }
}

impl From<Pin> for u32 {
    fn from(pin: Pin) -> u32 {
        pin.id()
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}{}", self.bank.letter(), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_encodes_bank_and_index() {
        let pin = Pin::new(Bank::H, 21);
        assert_eq!(pin.id(), 7 * 32 + 21);
        assert_eq!(Pin::from_id(pin.id()).unwrap(), pin);
        assert_eq!(pin.to_string(), "PH21");
    }

    #[test]
    fn rejects_banks_past_i() {
        assert_eq!(Pin::from_id(8 * 32 + 31).unwrap(), Pin::new(Bank::I, 31));
        assert!(matches!(
            Pin::try_from(9 * 32),
            Err(GpioError::InvalidPin(288))
        ));
    }

    #[test]
    fn bank_letters() {
        assert_eq!(Bank::A.letter(), 'A');
        assert_eq!(Bank::I.letter(), 'I');
        assert_eq!(Bank::from_index(6), Some(Bank::G));
        assert_eq!(Bank::from_index(9), None);
    }

    #[test]
    #[should_panic(expected = "pin index out of range")]
    fn new_rejects_index_32() {
        let _ = Pin::new(Bank::B, 32);
    }
}
