//! Patch CubeMX interrupt files so an RTOS port can own its handlers.
//!
//! STM32CubeMX regenerates `stm32*xx_it.c` / `stm32*xx_it.h` with definitions
//! of `SVC_Handler`, `PendSV_Handler` and `SysTick_Handler`, which clash with
//! the ones a FreeRTOS port provides. This crate locates those files for a
//! chosen board and comments out (or deletes) the offending blocks.
//!
//! - **[`core`]**: Pure marker scan and block rewrite. No I/O.
//! - **[`io`]**: Board discovery, config, and the read-patch-write wrapper.
//!
//! [`select`] and [`patch`] coordinate the two to implement CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod patch;
pub mod select;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
