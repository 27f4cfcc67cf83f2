pub mod app;
pub mod nes;

pub use nes::{Button, Nes};
