//! romasm assembles programs for the 8-bit register machine into
//! ROM images.
#[macro_use] extern crate log;

pub mod assembler;
