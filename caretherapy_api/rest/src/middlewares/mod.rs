pub mod client_key;
pub mod panic_handler;
pub mod request_id;
pub mod trace;
