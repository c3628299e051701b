pub mod board;
pub mod cli;
pub mod error;
pub mod game;
pub mod history;
pub mod persist;
pub mod session;
pub mod types;
pub mod wasm;

pub use wasm::wasm_ready;
