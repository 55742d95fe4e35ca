// src/lib.rs

#[macro_use]
pub mod macros;

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod geocode;
pub mod gui;
pub mod logging;
pub mod model;
pub mod rankings;
pub mod task;
