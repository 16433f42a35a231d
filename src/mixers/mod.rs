//! Fixed-size adapters exposing each hash (or a stage of it) as a
//! `mix_input(in, out)` function for avalanche measurement.

pub mod lookup2;
pub mod one_at_a_time;
