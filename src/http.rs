use std::time::Duration;

/// Blocking agent shared by both outbound calls: bounded by `timeout`, and
/// non-2xx statuses come back as responses so callers can map them to their own errors.
pub fn agent(timeout: Duration) -> ureq::Agent {
    let config = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build();
    ureq::Agent::new_with_config(config)
}
