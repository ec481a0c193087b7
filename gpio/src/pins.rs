//! Named pins broken out on the reference board.
//!
//! Each constant is built from its own bank and pin number as given in the
//! A20 datasheet.

use crate::pin::{Bank, Pin};

pub const PB2: Pin = Pin::new(Bank::B, 2);
pub const PB3: Pin = Pin::new(Bank::B, 3);
pub const PB4: Pin = Pin::new(Bank::B, 4);
pub const PB14: Pin = Pin::new(Bank::B, 14);
pub const PB15: Pin = Pin::new(Bank::B, 15);
pub const PB16: Pin = Pin::new(Bank::B, 16);
pub const PB17: Pin = Pin::new(Bank::B, 17);
pub const PB18: Pin = Pin::new(Bank::B, 18);
pub const PB19: Pin = Pin::new(Bank::B, 19);

pub const PC19: Pin = Pin::new(Bank::C, 19);
pub const PC20: Pin = Pin::new(Bank::C, 20);
pub const PC21: Pin = Pin::new(Bank::C, 21);
pub const PC22: Pin = Pin::new(Bank::C, 22);

pub const PG0: Pin = Pin::new(Bank::G, 0);
pub const PG1: Pin = Pin::new(Bank::G, 1);
pub const PG2: Pin = Pin::new(Bank::G, 2);
pub const PG3: Pin = Pin::new(Bank::G, 3);
pub const PG4: Pin = Pin::new(Bank::G, 4);
pub const PG5: Pin = Pin::new(Bank::G, 5);
pub const PG6: Pin = Pin::new(Bank::G, 6);
pub const PG7: Pin = Pin::new(Bank::G, 7);
pub const PG8: Pin = Pin::new(Bank::G, 8);
pub const PG9: Pin = Pin::new(Bank::G, 9);
pub const PG10: Pin = Pin::new(Bank::G, 10);
pub const PG11: Pin = Pin::new(Bank::G, 11);

pub const PH7: Pin = Pin::new(Bank::H, 7);
pub const PH11: Pin = Pin::new(Bank::H, 11);
pub const PH20: Pin = Pin::new(Bank::H, 20);
pub const PH21: Pin = Pin::new(Bank::H, 21);

pub const PI3: Pin = Pin::new(Bank::I, 3);
pub const PI14: Pin = Pin::new(Bank::I, 14);
pub const PI15: Pin = Pin::new(Bank::I, 15);
pub const PI20: Pin = Pin::new(Bank::I, 20);
pub const PI21: Pin = Pin::new(Bank::I, 21);

/// Every named pin with its datasheet name, for binding layers that export
/// them by name.
pub const NAMED: &[(&str, Pin)] = &[
    ("PB2", PB2),
    ("PB3", PB3),
    ("PB4", PB4),
    ("PB14", PB14),
    ("PB15", PB15),
    ("PB16", PB16),
    ("PB17", PB17),
    ("PB18", PB18),
    ("PB19", PB19),
    ("PC19", PC19),
    ("PC20", PC20),
    ("PC21", PC21),
    ("PC22", PC22),
    ("PG0", PG0),
    ("PG1", PG1),
    ("PG2", PG2),
    ("PG3", PG3),
    ("PG4", PG4),
    ("PG5", PG5),
    ("PG6", PG6),
    ("PG7", PG7),
    ("PG8", PG8),
    ("PG9", PG9),
    ("PG10", PG10),
    ("PG11", PG11),
    ("PH7", PH7),
    ("PH11", PH11),
    ("PH20", PH20),
    ("PH21", PH21),
    ("PI3", PI3),
    ("PI14", PI14),
    ("PI15", PI15),
    ("PI20", PI20),
    ("PI21", PI21),
];

/// Alternative spellings published by earlier bindings.
pub const ALIASES: &[(&str, Pin)] = &[("PH07", PH7)];

/// Look up a named pin, aliases and board names included.
pub fn by_name(name: &str) -> Option<Pin> {
    NAMED
        .iter()
        .chain(ALIASES)
        .chain(cubietruck::NAMED)
        .find(|(named, _)| *named == name)
        .map(|(_, pin)| *pin)
}

/// Cubietruck on-board LEDs and the SPI bus on connector CN8 (pins 9-12).
pub mod cubietruck {
    use super::*;

    pub const LED_BLUE: Pin = PH21;
    pub const LED_ORANGE: Pin = PH20;
    pub const LED_WHITE: Pin = PH11;
    pub const LED_GREEN: Pin = PH7;

    pub const LEDS: [Pin; 4] = [LED_BLUE, LED_ORANGE, LED_WHITE, LED_GREEN];

    pub const MISO: Pin = PB17;
    pub const MOSI: Pin = PB16;
    pub const SCK: Pin = PB15;
    pub const CS: Pin = PB14;

    /// SPI signal assignment.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct SpiPins {
        /// Master in, slave out.
        pub miso: Pin,
        /// Master out, slave in.
        pub mosi: Pin,
        /// Serial clock.
        pub sck: Pin,
        /// Chip select.
        pub cs: Pin,
    }

    pub const SPI: SpiPins = SpiPins {
        miso: MISO,
        mosi: MOSI,
        sck: SCK,
        cs: CS,
    };

    pub const NAMED: &[(&str, Pin)] = &[
        ("LED_BLUE", LED_BLUE),
        ("LED_ORANGE", LED_ORANGE),
        ("LED_WHITE", LED_WHITE),
        ("LED_GREEN", LED_GREEN),
        ("MISO", MISO),
        ("MOSI", MOSI),
        ("SCK", SCK),
        ("CS", CS),
    ];
}

#[cfg(test)]
mod tests {
    use super::cubietruck::{LED_BLUE, LED_GREEN, LED_ORANGE, LED_WHITE, SPI};
    use super::*;

    #[test]
    fn names_match_bank_and_pin() {
        for (name, pin) in NAMED {
            assert_eq!(pin.to_string(), *name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut ids: Vec<u32> = NAMED.iter().map(|(_, pin)| pin.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), NAMED.len());
    }

    #[test]
    fn pb19_is_its_own_pin() {
        assert_eq!(PB19.bank(), Bank::B);
        assert_eq!(PB19.index(), 19);
        assert_eq!(PB19.id(), 51);
    }

    #[test]
    fn board_aliases() {
        assert_eq!(LED_BLUE.to_string(), "PH21");
        assert_eq!(LED_ORANGE.to_string(), "PH20");
        assert_eq!(LED_WHITE.to_string(), "PH11");
        assert_eq!(LED_GREEN.to_string(), "PH7");
        assert_eq!(SPI.miso.to_string(), "PB17");
        assert_eq!(SPI.mosi.to_string(), "PB16");
        assert_eq!(SPI.sck.to_string(), "PB15");
        assert_eq!(SPI.cs.to_string(), "PB14");
    }

    #[test]
    fn aliases_resolve_to_their_pin() {
        assert_eq!(by_name("PH07"), Some(PH7));
        for (alias, pin) in ALIASES {
            assert!(NAMED.iter().any(|(_, named)| named == pin), "{alias}");
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("PG10"), Some(PG10));
        assert_eq!(by_name("LED_BLUE"), Some(PH21));
        assert_eq!(by_name("PZ1"), None);
    }
}
