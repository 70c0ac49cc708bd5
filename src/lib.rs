#![no_std]
#![doc = include_str!("../README.md")]

pub mod calibration;
pub mod gate;
pub mod menu;
pub mod mod1;
pub mod mode;
pub mod output;
pub mod quantizer;
pub mod rng;
pub mod scale_selector;
pub mod sequencer;
pub mod shift_register;
mod utils;
