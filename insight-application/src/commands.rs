pub mod auth_commands;
pub mod device_commands;
pub mod purge_commands;
