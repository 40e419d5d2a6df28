//! Example HTTP service: a greeting at `/` and a health check at `/health`

pub mod cli;
pub mod routes;
pub mod server;

pub use routes::create_router;
pub use server::Server;
