pub mod api_client;
pub mod config_io;
#[cfg(test)]
pub mod fake_api;
pub mod logging;
