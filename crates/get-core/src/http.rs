use std::sync::LazyLock;

use ureq::Agent;

/// Shared blocking HTTP agent.
///
/// Statuses are surfaced on the response rather than as errors so callers
/// can treat a 404 as "not located" instead of a hard failure.
pub static AGENT: LazyLock<Agent> = LazyLock::new(|| {
    Agent::config_builder()
        .user_agent("fortheusers/get")
        .http_status_as_error(false)
        .build()
        .into()
});
