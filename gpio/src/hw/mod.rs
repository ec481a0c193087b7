//! Raw register layouts, one module per SoC.

#[cfg(feature = "sun7i")]
pub mod sun7i;
