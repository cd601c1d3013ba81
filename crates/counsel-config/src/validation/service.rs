//! Validation for the `[service]` section.

use crate::schema::CounselConfig;

use super::helpers::validate_range;

pub(crate) fn validate_service(errors: &mut Vec<String>, config: &CounselConfig) {
    let url = config.service.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "service.base_url = {url:?} must start with http:// or https://"
        ));
    }
    validate_range(
        errors,
        "service.connect_timeout_secs",
        config.service.connect_timeout_secs,
        1,
        300,
    );
    validate_range(
        errors,
        "service.request_timeout_secs",
        config.service.request_timeout_secs,
        1,
        3600,
    );
}
