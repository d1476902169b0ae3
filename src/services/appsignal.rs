//! AppSignal GraphQL service adapter.
//!
//! Thin client for the AppSignal GraphQL API. Every operation is a single
//! POST of `{query, variables}` against the configured endpoint, with the
//! personal API token carried as a `token` query parameter. Responses are
//! passed through as raw JSON; interpreting them is the caller's business.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use super::error::UpstreamError;
use crate::domains::tools::ResolvedCredentials;

/// Default AppSignal GraphQL endpoint.
pub const DEFAULT_BASE_URL: &str = "https://appsignal.com/graphql";

/// Search exception samples across an organization.
const SEARCH_QUERY: &str = r#"
query Search(
  $organizationSlug: String!
  $query: String
  $namespace: String
  $sampleType: SampleTypeEnum
) {
  organization(slug: $organizationSlug) {
    search(
      query: $query
      namespace: $namespace
      sampleType: $sampleType
    ) {
      ... on ExceptionSample {
        id
        time
        action
        namespace
        exception {
          name
          message
        }
        incident {
          ... on ExceptionIncident {
            number
          }
        }
        app {
          name
          id
        }
      }
    }
  }
}
"#;

/// List open exception incidents for an app.
const EXCEPTION_INCIDENTS_QUERY: &str = r#"
query ExceptionIncidentsQuery($appId: String!, $limit: Int, $offset: Int) {
  app(id: $appId) {
    id
    exceptionIncidents(
      limit: $limit
      offset: $offset
    ) {
      id
      number
      count
      lastOccurredAt
      exceptionName
      actionNames
      namespace
      severity
    }
  }
}
"#;

/// Fetch one incident with an optional sample.
const INCIDENT_QUERY: &str = r#"
query IncidentQuery(
  $appId: String!
  $incidentNumber: Int!
  $sampleId: String
  $timestamp: String
  $timerange: [DateTime]
) {
  app(id: $appId) {
    id
    incident(incidentNumber: $incidentNumber) {
      ... on ExceptionIncident {
        ...ExceptionIncident
      }
      ... on PerformanceIncident {
        ...PerformanceIncident
      }
    }
  }
}

fragment ExceptionIncident on ExceptionIncident {
  id
  number
  lastOccurredAt
  actionNames
  exceptionName
  state
  namespace
  firstBacktraceLine
  severity
  sample(id: $sampleId, timestamp: $timestamp, timerange: $timerange) {
    id
    time
    action
    namespace
    exception {
      name
      message
      backtrace {
        line
        method
        path
      }
    }
  }
}

fragment PerformanceIncident on PerformanceIncident {
  id
  number
  lastOccurredAt
  actionNames
  state
  description
  severity
  namespace
  sample(id: $sampleId, timestamp: $timestamp, timerange: $timerange) {
    id
    time
    action
    namespace
    duration
    overview {
      key
      value
    }
  }
}
"#;

/// List performance incidents for an app.
const PERFORMANCE_INCIDENTS_QUERY: &str = r#"
query PerformanceIncidentsQuery(
  $appId: String!
  $limit: Int
  $offset: Int
  $state: IncidentStateEnum
  $order: IncidentOrderEnum
) {
  app(id: $appId) {
    id
    performanceIncidents(
      limit: $limit
      offset: $offset
      state: $state
      order: $order
    ) {
      id
      number
      actionNames
      lastOccurredAt
      notificationThreshold
      severity
      description
      namespace
    }
  }
}
"#;

/// AppSignal operations consumed by the error-tracking tools.
///
/// One method per domain action. The credential pair carries the personal
/// API token as the secret and the app ID as the identifier.
#[async_trait]
pub trait AppSignalApi: Send + Sync {
    /// Search exception samples in an organization.
    async fn search_errors(
        &self,
        creds: &ResolvedCredentials,
        organization_slug: &str,
        query_string: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<Value, UpstreamError>;

    /// List open exception incidents.
    async fn exception_incidents(
        &self,
        creds: &ResolvedCredentials,
        limit: i64,
        offset: i64,
    ) -> Result<Value, UpstreamError>;

    /// Fetch one incident, optionally narrowed to a specific sample.
    async fn incident_details(
        &self,
        creds: &ResolvedCredentials,
        incident_number: i64,
        sample_id: Option<&str>,
        timestamp: Option<&str>,
        timerange: Option<&[String]>,
    ) -> Result<Value, UpstreamError>;

    /// List performance incidents.
    async fn performance_incidents(
        &self,
        creds: &ResolvedCredentials,
        limit: i64,
        offset: i64,
        state: Option<&str>,
    ) -> Result<Value, UpstreamError>;
}

/// Production AppSignal client.
pub struct AppSignalClient {
    http: reqwest::Client,
    base_url: String,
}

impl AppSignalClient {
    /// Create a client against the given GraphQL endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn post_graphql(
        &self,
        token: &str,
        query: &str,
        variables: Value,
    ) -> Result<Value, UpstreamError> {
        let url = format!("{}?token={}", self.base_url, token);
        debug!(endpoint = %self.base_url, "posting GraphQL query");

        let response = self
            .http
            .post(&url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::status(status.as_u16(), body));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl AppSignalApi for AppSignalClient {
    async fn search_errors(
        &self,
        creds: &ResolvedCredentials,
        organization_slug: &str,
        query_string: Option<&str>,
        namespace: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let variables = json!({
            "organizationSlug": organization_slug,
            "query": query_string,
            "namespace": namespace,
            "sampleType": "EXCEPTION",
        });
        self.post_graphql(&creds.secret, SEARCH_QUERY, variables)
            .await
    }

    async fn exception_incidents(
        &self,
        creds: &ResolvedCredentials,
        limit: i64,
        offset: i64,
    ) -> Result<Value, UpstreamError> {
        let variables = json!({
            "appId": creds.identifier,
            "limit": limit,
            "offset": offset,
        });
        self.post_graphql(&creds.secret, EXCEPTION_INCIDENTS_QUERY, variables)
            .await
    }

    async fn incident_details(
        &self,
        creds: &ResolvedCredentials,
        incident_number: i64,
        sample_id: Option<&str>,
        timestamp: Option<&str>,
        timerange: Option<&[String]>,
    ) -> Result<Value, UpstreamError> {
        let variables = json!({
            "appId": creds.identifier,
            "incidentNumber": incident_number,
            "sampleId": sample_id,
            "timestamp": timestamp,
            "timerange": timerange,
        });
        self.post_graphql(&creds.secret, INCIDENT_QUERY, variables)
            .await
    }

    async fn performance_incidents(
        &self,
        creds: &ResolvedCredentials,
        limit: i64,
        offset: i64,
        state: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let variables = json!({
            "appId": creds.identifier,
            "limit": limit,
            "offset": offset,
            "state": state,
            "order": null,
        });
        self.post_graphql(&creds.secret, PERFORMANCE_INCIDENTS_QUERY, variables)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_target_expected_fields() {
        assert!(SEARCH_QUERY.contains("organization(slug: $organizationSlug)"));
        assert!(SEARCH_QUERY.contains("ExceptionSample"));
        assert!(EXCEPTION_INCIDENTS_QUERY.contains("exceptionIncidents"));
        assert!(INCIDENT_QUERY.contains("incident(incidentNumber: $incidentNumber)"));
        assert!(INCIDENT_QUERY.contains("fragment PerformanceIncident"));
        assert!(PERFORMANCE_INCIDENTS_QUERY.contains("performanceIncidents"));
    }

    // Integration test (requires network and a real token, run with: cargo test -- --ignored)
    #[ignore]
    #[tokio::test]
    async fn test_exception_incidents_roundtrip() {
        let token = std::env::var("APPSIGNAL_TEST_TOKEN").expect("APPSIGNAL_TEST_TOKEN");
        let app_id = std::env::var("APPSIGNAL_TEST_APP_ID").expect("APPSIGNAL_TEST_APP_ID");
        let creds = ResolvedCredentials {
            secret: token,
            identifier: app_id,
        };

        let client = AppSignalClient::new(DEFAULT_BASE_URL);
        let result = client.exception_incidents(&creds, 5, 0).await.unwrap();
        assert!(result.get("data").is_some());
    }
}
