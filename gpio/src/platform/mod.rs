//! Platform Abstraction Layer
//!
//! Each supported SoC provides a controller implementing
//! [`GpioController`](crate::hal::gpio::GpioController). Exactly one SoC is
//! selected at build time through Cargo features and re-exported as [`Gpio`].

cfg_if::cfg_if! {
    if #[cfg(feature = "sun7i")] {
        pub mod sun7i;
        pub use sun7i::Sun7iGpio as Gpio;
    } else {
        compile_error!(
            "No SoC selected!\n\
            Use: cargo build --features sun7i"
        );
    }
}
