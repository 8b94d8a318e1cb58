pub mod api;
pub mod constants;
pub mod errors;
pub mod middleware;
pub mod portfolio;
pub mod utils;
pub mod wallet;
