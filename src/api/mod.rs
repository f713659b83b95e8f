pub mod api;
pub mod dtos;
pub(crate) mod errors;
mod middlewares;
mod todos_handler;
