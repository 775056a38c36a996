pub mod config;
pub mod constants;
pub mod http_client;
pub mod transport_error;

#[cfg(test)]
pub(crate) mod test_server;
