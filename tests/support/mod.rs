#![allow(dead_code)]

pub mod architecture;
pub mod market;
pub mod recording;
