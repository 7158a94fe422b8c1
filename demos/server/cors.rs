use super::*;

/// Parses a comma separated origin list, dropping entries that are not URIs.
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter(|origin| match origin.parse::<Uri>() {
            Ok(_) => true,
            Err(e) => {
                warn!("Invalid URI in CORS_ORIGINS {:?}: {}", origin, e);
                false
            }
        })
        .map(str::to_string)
        .collect()
}

pub fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        return Cors::permissive();
    }
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
