//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of resolved values
//! - Check the peer endpoint is a usable `host:port`
//! - Reject zero timeouts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ClientConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("peer endpoint '{0}' is not of the form host:port")]
    InvalidEndpoint(String),

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),
}

pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (name, value) in [
        ("channel name", &config.channel_name),
        ("chaincode name", &config.chaincode_name),
        ("MSP ID", &config.msp_id),
        ("peer host alias", &config.peer_host_alias),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty(name));
        }
    }

    if !is_host_port(&config.peer_endpoint) {
        errors.push(ValidationError::InvalidEndpoint(config.peer_endpoint.clone()));
    }

    let timeouts = &config.timeouts;
    for (name, secs) in [
        ("connect", timeouts.connect_secs),
        ("evaluate", timeouts.evaluate_secs),
        ("endorse", timeouts.endorse_secs),
        ("submit", timeouts.submit_secs),
        ("commit status", timeouts.commit_status_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(endpoint: &str) -> bool {
    match endpoint.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}
