//! Wire schema of a single log record
//!
//! Field order and names follow the cloud error-reporting format. Optional
//! sections are skipped entirely when empty; they never serialize as `null`
//! or `{}`.

use super::error::Result;
use super::fields::Fields;
use super::severity::Severity;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the emitting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContext {
    pub service: String,
    pub version: String,
}

impl ServiceContext {
    /// Returns `None` unless both service and version are non-empty.
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Option<Self> {
        let service = service.into();
        let version = version.into();
        if service.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self { service, version })
    }
}

/// Call site of an error-tier emission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportLocation {
    pub file_path: String,
    pub function_name: String,
    pub line_number: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Context<'a> {
    #[serde(skip_serializing_if = "Fields::is_empty")]
    pub data: &'a Fields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_location: Option<ReportLocation>,
}

impl<'a> Context<'a> {
    /// Returns `None` when there is neither data nor a report location.
    pub fn new(data: &'a Fields, report_location: Option<ReportLocation>) -> Option<Self> {
        if data.is_empty() && report_location.is_none() {
            return None;
        }
        Some(Self {
            data,
            report_location,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload<'a> {
    pub severity: Severity,
    pub event_time: String,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_context: Option<&'a ServiceContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

impl<'a> Payload<'a> {
    /// Create a payload stamped with the current time
    pub fn new(severity: Severity, message: &'a str) -> Self {
        Self::at(severity, message, Utc::now())
    }

    pub fn at(severity: Severity, message: &'a str, time: DateTime<Utc>) -> Self {
        Self {
            severity,
            event_time: format_event_time(&time),
            message,
            service_context: None,
            context: None,
            stacktrace: None,
        }
    }

    pub fn with_service_context(mut self, service_context: Option<&'a ServiceContext>) -> Self {
        self.service_context = service_context;
        self
    }

    pub fn with_context(mut self, context: Option<Context<'a>>) -> Self {
        self.context = context;
        self
    }

    pub fn with_stacktrace(mut self, stacktrace: String) -> Self {
        self.stacktrace = Some(stacktrace).filter(|s| !s.is_empty());
        self
    }

    /// Serialize to a single-line JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// RFC 3339 with second precision, e.g. `2025-01-08T10:30:45Z`
pub fn format_event_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
