pub mod history;
pub mod rlw;
