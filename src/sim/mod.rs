pub mod event;
pub mod focus;
pub mod session;
pub mod timer;
pub mod words;
