//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! Vocabulary shared by every SoC driver in this crate. Nothing here
//! references a register layout.
//!
//! - [`gpio`]: pin levels, pin modes and the controller trait

pub mod gpio;
