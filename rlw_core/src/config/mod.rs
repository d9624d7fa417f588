pub mod rlw_config;
