pub mod cors;
pub mod handlers;
pub mod middleware;
pub mod routes;
