pub mod drip_server;
