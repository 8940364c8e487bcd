pub mod request_logger;
