pub mod build_ops;
pub mod config_ops;
