mod gpio;

pub use gpio::Sun7iGpio;
