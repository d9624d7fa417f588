pub mod enums;
pub mod exception;
pub mod time;
pub mod utils;
