use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::{CorsConfig, DEFAULT_ALLOWED_ORIGIN};
use crate::error::ConfigError;

/// Build a CORS layer from config.
///
/// Methods and headers are mirrored from the preflight request rather than
/// answered with `*`, which browsers ignore on credentialed requests.
///
/// # Errors
///
/// Returns [`ConfigError::WildcardWithCredentials`] if `allow_credentials` is
/// `true` while `allowed_origins` contains `"*"`, and
/// [`ConfigError::InvalidOrigin`] for an origin that is not a valid header value.
pub fn build_cors_layer(cfg: &CorsConfig) -> Result<CorsLayer, ConfigError> {
    let has_wildcard_origin = cfg.allowed_origins.iter().any(|o| o == "*");

    if has_wildcard_origin && cfg.allow_credentials {
        return Err(ConfigError::WildcardWithCredentials);
    }

    let origin = if has_wildcard_origin {
        warn!("CORS is configured with allowed_origins=['*']; any website may call the API");
        AllowOrigin::any()
    } else {
        let origins = cfg
            .allowed_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).map_err(|_| ConfigError::InvalidOrigin(o.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.allow_credentials))
}

/// The layer for [`CorsConfig::default`]; cannot fail.
pub fn default_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
