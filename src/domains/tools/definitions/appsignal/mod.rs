//! AppSignal error-tracking tools.
//!
//! Four tools over the AppSignal GraphQL API: free-text error search,
//! open exception incidents, single-incident details, and performance
//! incidents. They share one credential pair and one service adapter.

pub mod all_errors;
pub mod all_incidents;
pub mod incident_details;
pub mod search_errors;

pub use all_errors::{GetAllErrorsParams, GetAllErrorsTool};
pub use all_incidents::{GetAllIncidentsParams, GetAllIncidentsTool};
pub use incident_details::{GetIncidentDetailsParams, GetIncidentDetailsTool};
pub use search_errors::{SearchErrorsParams, SearchErrorsTool};

use crate::domains::tools::CredentialKeys;

/// Credential pair shared by every AppSignal tool: the personal API token
/// and the app ID.
pub const APPSIGNAL_CREDENTIALS: CredentialKeys = CredentialKeys::new("personal_api", "app_id");

/// Default page size for incident listings.
pub(crate) fn default_limit() -> i64 {
    100
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::domains::tools::ResolvedCredentials;
    use crate::services::{AppSignalApi, UpstreamError};

    /// Stub adapter that counts calls and records the last variables seen.
    pub struct StubAppSignal {
        pub calls: AtomicUsize,
        pub last_variables: std::sync::Mutex<Option<Value>>,
        pub payload: Value,
    }

    impl StubAppSignal {
        pub fn new(payload: Value) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                last_variables: std::sync::Mutex::new(None),
                payload,
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self, variables: Value) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_variables.lock().unwrap() = Some(variables);
            Ok(self.payload.clone())
        }
    }

    #[async_trait]
    impl AppSignalApi for StubAppSignal {
        async fn search_errors(
            &self,
            creds: &ResolvedCredentials,
            organization_slug: &str,
            query_string: Option<&str>,
            namespace: Option<&str>,
        ) -> Result<Value, UpstreamError> {
            self.record(json!({
                "secret": creds.secret,
                "organizationSlug": organization_slug,
                "query": query_string,
                "namespace": namespace,
            }))
        }

        async fn exception_incidents(
            &self,
            creds: &ResolvedCredentials,
            limit: i64,
            offset: i64,
        ) -> Result<Value, UpstreamError> {
            self.record(json!({
                "appId": creds.identifier,
                "limit": limit,
                "offset": offset,
            }))
        }

        async fn incident_details(
            &self,
            creds: &ResolvedCredentials,
            incident_number: i64,
            sample_id: Option<&str>,
            timestamp: Option<&str>,
            timerange: Option<&[String]>,
        ) -> Result<Value, UpstreamError> {
            self.record(json!({
                "appId": creds.identifier,
                "incidentNumber": incident_number,
                "sampleId": sample_id,
                "timestamp": timestamp,
                "timerange": timerange,
            }))
        }

        async fn performance_incidents(
            &self,
            creds: &ResolvedCredentials,
            limit: i64,
            offset: i64,
            state: Option<&str>,
        ) -> Result<Value, UpstreamError> {
            self.record(json!({
                "appId": creds.identifier,
                "limit": limit,
                "offset": offset,
                "state": state,
            }))
        }
    }

    /// Arguments carrying a complete injected credentials object.
    pub fn args_with_credentials(mut extra: Value) -> rmcp::model::JsonObject {
        let object = extra.as_object_mut().expect("test arguments");
        object.insert(
            "__credentials__".to_string(),
            json!({ "personal_api": "token-1", "app_id": "app-1" }),
        );
        object.clone()
    }
}
