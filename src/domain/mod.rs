pub mod board;
pub mod input;
pub mod keyboard;
pub mod letter;
pub mod scoring;
