use actix_cors::Cors;
use actix_web::http::{Method, header};

/// CORS policy for the API. With no origins configured only same-origin
/// requests get through. Origins must already be validated by
/// `AppConfig`, otherwise the middleware refuses to start.
pub fn cors(origins: &[String]) -> Cors {
    origins.iter().fold(
        Cors::default()
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allowed_header(header::CONTENT_TYPE)
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}
