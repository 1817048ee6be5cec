//! Jolokia connector and session.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::dto::{Attribute, PoolAttributes, Request, Response, Usage, Version, MEMORY_POOL_PATTERN};
use crate::domain::{JmxServiceUrl, MemoryPoolInfo, MemoryUsage, PoolOrder, PoolType};
use crate::error::{ConnectionError, Error, Result};
use crate::infrastructure::config::transport::{TransportConfig, TransportMode};
use crate::port::outbound::management::{ManagementConnector, ManagementSession};

const POOL_ATTRIBUTES: &[&str] = &["Name", "Type"];

/// Opens Jolokia sessions to JVMs.
#[derive(Debug, Clone)]
pub struct JolokiaConnector {
    client: Client,
    config: TransportConfig,
}

impl JolokiaConnector {
    /// Create a connector whose HTTP client is bounded by the configured
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.request_timeout())
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    /// HTTP endpoint and optional proxy target for `url`.
    fn endpoint(&self, url: &JmxServiceUrl) -> Result<(Url, Option<String>)> {
        match self.config.mode {
            TransportMode::Direct => {
                let target = url.target();
                let host = if target.host.contains(':') && !target.host.starts_with('[') {
                    format!("[{}]", target.host)
                } else {
                    target.host.clone()
                };
                let raw = format!(
                    "{}://{}:{}{}",
                    self.config.scheme, host, target.port, self.config.path
                );
                let endpoint = Url::parse(&raw).map_err(|e| ConnectionError::InvalidUrl {
                    url: raw.clone(),
                    reason: e.to_string(),
                })?;
                Ok((endpoint, None))
            }
            TransportMode::Proxy => {
                let raw = self.config.proxy_url.as_deref().unwrap_or_default();
                let endpoint = Url::parse(raw).map_err(|e| ConnectionError::InvalidUrl {
                    url: raw.to_string(),
                    reason: e.to_string(),
                })?;
                Ok((endpoint, Some(url.to_string())))
            }
        }
    }
}

#[async_trait]
impl ManagementConnector for JolokiaConnector {
    fn name(&self) -> &'static str {
        "jolokia"
    }

    async fn connect(&self, url: &JmxServiceUrl) -> Result<Box<dyn ManagementSession>> {
        let (endpoint, target) = self.endpoint(url)?;
        let session = JolokiaSession {
            client: self.client.clone(),
            endpoint,
            target,
            mbeans: Mutex::new(HashMap::new()),
        };

        let version: Version = session
            .call_one(Request::version())
            .await
            .and_then(Response::into_typed)
            .map_err(|e| ConnectionError::Handshake {
                endpoint: session.endpoint.to_string(),
                reason: e.to_string(),
            })?;
        debug!(
            endpoint = %session.endpoint,
            agent = version.agent.as_deref().unwrap_or("unknown"),
            protocol = version.protocol.as_deref().unwrap_or("unknown"),
            "jolokia session opened"
        );

        Ok(Box::new(session))
    }
}

struct JolokiaSession {
    client: Client,
    endpoint: Url,
    /// JMX service URL forwarded by a proxy; `None` for direct agents.
    target: Option<String>,
    /// Pool name to MBean object name, filled by `memory_pools`.
    mbeans: Mutex<HashMap<String, String>>,
}

impl JolokiaSession {
    /// Post `requests` as one bulk call; responses come back in request order.
    async fn call(&self, requests: Vec<Request>) -> Result<Vec<Response>> {
        let expected = requests.len();
        let requests: Vec<Request> = requests
            .into_iter()
            .map(|request| request.via(self.target.as_deref()))
            .collect();

        let responses = self
            .client
            .post(self.endpoint.clone())
            .json(&requests)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| ConnectionError::Transport(e.to_string()))?
            .json::<Vec<Response>>()
            .await?;

        if responses.len() != expected {
            return Err(ConnectionError::Transport(format!(
                "expected {expected} responses, got {}",
                responses.len()
            ))
            .into());
        }
        Ok(responses)
    }

    async fn call_one(&self, request: Request) -> Result<Response> {
        self.call(vec![request])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| ConnectionError::Transport("empty bulk response".into()).into())
    }

    fn mbean_for(&self, pool: &MemoryPoolInfo) -> String {
        self.mbeans
            .lock()
            .ok()
            .and_then(|mbeans| mbeans.get(&pool.name).cloned())
            .unwrap_or_else(|| format!("java.lang:type=MemoryPool,name={}", pool.name))
    }
}

#[async_trait]
impl ManagementSession for JolokiaSession {
    async fn memory_pools(&self) -> Result<Vec<MemoryPoolInfo>> {
        let names: Vec<String> = self
            .call_one(Request::search(MEMORY_POOL_PATTERN))
            .await?
            .into_typed()?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let reads = names
            .iter()
            .map(|mbean| Request::read(mbean, Attribute::Many(POOL_ATTRIBUTES)))
            .collect();
        let responses = self.call(reads).await?;

        let mut pools = Vec::with_capacity(names.len());
        let mut mbeans = HashMap::with_capacity(names.len());
        for (mbean, response) in names.into_iter().zip(responses) {
            let attributes: PoolAttributes = response.into_typed()?;
            let Some(pool_type) = PoolType::parse(&attributes.pool_type) else {
                warn!(mbean = %mbean, pool_type = %attributes.pool_type, "skipping pool with unknown type");
                continue;
            };
            mbeans.insert(attributes.name.clone(), mbean);
            pools.push(MemoryPoolInfo::new(attributes.name, pool_type));
        }

        if let Ok(mut known) = self.mbeans.lock() {
            *known = mbeans;
        }
        Ok(pools)
    }

    /// Search results follow the MBean server's query order, not the runtime's.
    fn pool_order(&self) -> PoolOrder {
        PoolOrder::Unspecified
    }

    async fn peak_usage(&self, pool: &MemoryPoolInfo) -> Result<MemoryUsage> {
        let mbean = self.mbean_for(pool);
        let usage: Usage = self
            .call_one(Request::read(&mbean, Attribute::One("PeakUsage")))
            .await?
            .into_typed()?;
        Ok(usage.into())
    }

    async fn usage_threshold(&self, pool: &MemoryPoolInfo) -> Result<u64> {
        let mbean = self.mbean_for(pool);
        let threshold: i64 = self
            .call_one(Request::read(&mbean, Attribute::One("UsageThreshold")))
            .await?
            .into_typed()?;
        u64::try_from(threshold).map_err(|_| {
            Error::UnsupportedOperation(format!("negative usage threshold {threshold} on {}", pool.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::{json, Value};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, Request as MockRequest, Respond, ResponseTemplate};

    use super::*;
    use crate::application::PeakUsageCollector;
    use crate::domain::error::PoolError;
    use crate::domain::{ConnectionTarget, PoolSelector};

    /// Minimal Jolokia agent answering bulk requests for a fixed pool layout.
    struct FakeAgent {
        /// (mbean, name, type, peak usage, usage threshold or `None` if unsupported)
        pools: Vec<(&'static str, &'static str, &'static str, Value, Option<i64>)>,
        /// Search answer order; pool order when `None`.
        search: Option<Vec<&'static str>>,
    }

    impl FakeAgent {
        fn parallel_gc() -> Self {
            let small = json!({"init": 1024, "committed": 1024, "max": -1, "used": 512});
            Self {
                pools: vec![
                    ("java.lang:name=Code Cache,type=MemoryPool", "Code Cache", "NON_HEAP", small.clone(), Some(0)),
                    ("java.lang:name=PS Eden Space,type=MemoryPool", "PS Eden Space", "HEAP", small.clone(), None),
                    ("java.lang:name=PS Survivor Space,type=MemoryPool", "PS Survivor Space", "HEAP", small, None),
                    (
                        "java.lang:name=PS Old Gen,type=MemoryPool",
                        "PS Old Gen",
                        "HEAP",
                        json!({"init": 268435456, "committed": 536870912, "max": 1073741824, "used": 402653184}),
                        Some(900_000_000),
                    ),
                ],
                search: None,
            }
        }

        /// Pools registered young, old, survivor, none named like an old
        /// generation, with the search answer in hash order.
        fn unnamed_generations() -> Self {
            let usage = |used: i64| json!({"init": 1024, "committed": 4096, "max": 8192, "used": used});
            Self {
                pools: vec![
                    ("java.lang:name=young,type=MemoryPool", "young", "HEAP", usage(1), None),
                    ("java.lang:name=old,type=MemoryPool", "old", "HEAP", usage(2), None),
                    ("java.lang:name=survivor,type=MemoryPool", "survivor", "HEAP", usage(3), None),
                ],
                search: Some(vec![
                    "java.lang:name=young,type=MemoryPool",
                    "java.lang:name=survivor,type=MemoryPool",
                    "java.lang:name=old,type=MemoryPool",
                ]),
            }
        }

        fn answer(&self, request: &Value) -> Value {
            match request["type"].as_str() {
                Some("version") => json!({"status": 200, "value": {"agent": "1.7.2", "protocol": "7.2"}}),
                Some("search") => json!({
                    "status": 200,
                    "value": self.search.clone().unwrap_or_else(|| self.pools.iter().map(|p| p.0).collect()),
                }),
                Some("read") => {
                    let mbean = request["mbean"].as_str().unwrap_or_default();
                    let Some(pool) = self.pools.iter().find(|p| p.0 == mbean) else {
                        return json!({
                            "status": 404,
                            "error_type": "javax.management.InstanceNotFoundException",
                            "error": format!("javax.management.InstanceNotFoundException : {mbean}"),
                        });
                    };
                    match &request["attribute"] {
                        Value::Array(_) => json!({"status": 200, "value": {"Name": pool.1, "Type": pool.2}}),
                        Value::String(attr) if attr == "PeakUsage" => json!({"status": 200, "value": pool.3}),
                        Value::String(attr) if attr == "UsageThreshold" => match pool.4 {
                            Some(threshold) => json!({"status": 200, "value": threshold}),
                            None => json!({
                                "status": 500,
                                "error_type": "java.lang.UnsupportedOperationException",
                                "error": "java.lang.UnsupportedOperationException : Usage threshold is not supported",
                            }),
                        },
                        _ => json!({"status": 400, "error_type": "java.lang.IllegalArgumentException", "error": "bad attribute"}),
                    }
                }
                _ => json!({"status": 400, "error_type": "java.lang.IllegalArgumentException", "error": "bad type"}),
            }
        }
    }

    impl Respond for FakeAgent {
        fn respond(&self, request: &MockRequest) -> ResponseTemplate {
            let Ok(Value::Array(requests)) = serde_json::from_slice::<Value>(&request.body) else {
                return ResponseTemplate::new(400);
            };
            let answers: Vec<Value> = requests.iter().map(|r| self.answer(r)).collect();
            ResponseTemplate::new(200).set_body_json(answers)
        }
    }

    fn direct_config() -> TransportConfig {
        TransportConfig {
            request_timeout_secs: 2,
            ..TransportConfig::default()
        }
    }

    fn target_of(server: &MockServer) -> ConnectionTarget {
        let address = server.address();
        ConnectionTarget::new(address.ip().to_string(), address.port())
    }

    async fn agent() -> MockServer {
        agent_with(FakeAgent::parallel_gc()).await
    }

    async fn agent_with(fake: FakeAgent) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/jolokia/"))
            .respond_with(fake)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn direct_session_reads_pools_and_usage() {
        let server = agent().await;
        let connector = JolokiaConnector::new(direct_config()).unwrap();

        let session = connector
            .connect(&target_of(&server).service_url())
            .await
            .unwrap();
        let pools = session.memory_pools().await.unwrap();

        assert_eq!(pools.len(), 4);
        assert_eq!(pools[0], MemoryPoolInfo::new("Code Cache", PoolType::NonHeap));
        assert_eq!(pools[3], MemoryPoolInfo::new("PS Old Gen", PoolType::Heap));

        let usage = session.peak_usage(&pools[3]).await.unwrap();
        assert_eq!(usage.used, 402_653_184);
        assert_eq!(usage.max, 1_073_741_824);

        assert_eq!(session.usage_threshold(&pools[3]).await.unwrap(), 900_000_000);
        assert!(session
            .usage_threshold(&pools[1])
            .await
            .unwrap_err()
            .is_unsupported_operation());
    }

    #[tokio::test]
    async fn proxy_requests_carry_service_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/proxy/jolokia"))
            .respond_with(FakeAgent::parallel_gc())
            .mount(&server)
            .await;
        let connector = JolokiaConnector::new(TransportConfig {
            mode: TransportMode::Proxy,
            proxy_url: Some(format!("{}/proxy/jolokia", server.uri())),
            ..direct_config()
        })
        .unwrap();

        let session = connector
            .connect(&ConnectionTarget::new("10.0.0.5", 9999).service_url())
            .await
            .unwrap();
        session.memory_pools().await.unwrap();

        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 3);
        for request in received {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            for entry in body.as_array().unwrap() {
                assert_eq!(
                    entry["target"]["url"],
                    "service:jmx:rmi:///jndi/rmi://10.0.0.5:9999/jmxrmi"
                );
            }
        }
    }

    #[tokio::test]
    async fn handshake_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .mount(&server)
            .await;
        let connector = JolokiaConnector::new(direct_config()).unwrap();

        let err = connector
            .connect(&target_of(&server).service_url())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, Error::Connection(ConnectionError::Handshake { .. })));
    }

    #[tokio::test]
    async fn slow_agent_hits_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;
        let connector = JolokiaConnector::new(TransportConfig {
            request_timeout_secs: 1,
            ..direct_config()
        })
        .unwrap();

        let err = connector
            .connect(&target_of(&server).service_url())
            .await
            .err()
            .unwrap();

        assert!(matches!(err, Error::Connection(ConnectionError::Handshake { .. })));
    }

    #[tokio::test]
    async fn search_order_is_not_runtime_order() {
        let server = agent_with(FakeAgent::unnamed_generations()).await;
        let connector = JolokiaConnector::new(direct_config()).unwrap();

        let session = connector
            .connect(&target_of(&server).service_url())
            .await
            .unwrap();
        let names: Vec<String> = session
            .memory_pools()
            .await
            .unwrap()
            .into_iter()
            .map(|pool| pool.name)
            .collect();

        assert_eq!(names, ["young", "survivor", "old"]);
        assert_eq!(session.pool_order(), PoolOrder::Unspecified);
    }

    #[tokio::test]
    async fn shuffled_search_fails_instead_of_guessing_pool() {
        let server = agent_with(FakeAgent::unnamed_generations()).await;
        let collector =
            PeakUsageCollector::new(Arc::new(JolokiaConnector::new(direct_config()).unwrap()));

        let err = collector.query(&target_of(&server)).await.unwrap_err();

        assert!(matches!(err, Error::Pool(PoolError::Unordered { .. })));
    }

    #[tokio::test]
    async fn shuffled_search_with_configured_pool_reads_it() {
        let server = agent_with(FakeAgent::unnamed_generations()).await;
        let collector =
            PeakUsageCollector::new(Arc::new(JolokiaConnector::new(direct_config()).unwrap()))
                .with_selector(PoolSelector::named("old"));

        let snapshot = collector.query(&target_of(&server)).await.unwrap();

        assert_eq!(snapshot.used(), 2);
        assert_eq!(snapshot.usage_threshold(), None);
    }

    #[test]
    fn invalid_proxy_url_names_the_url() {
        let connector = JolokiaConnector::new(TransportConfig {
            mode: TransportMode::Proxy,
            proxy_url: Some("not a url".into()),
            ..direct_config()
        })
        .unwrap();

        let err = connector
            .endpoint(&ConnectionTarget::new("10.0.0.5", 9999).service_url())
            .unwrap_err();

        match err {
            Error::Connection(ConnectionError::InvalidUrl { url, .. }) => assert_eq!(url, "not a url"),
            other => panic!("expected invalid url, got {other}"),
        }
    }

    #[test]
    fn direct_endpoint_brackets_ipv6_hosts() {
        let connector = JolokiaConnector::new(direct_config()).unwrap();
        let (endpoint, target) = connector
            .endpoint(&ConnectionTarget::new("::1", 8778).service_url())
            .unwrap();

        assert_eq!(endpoint.as_str(), "http://[::1]:8778/jolokia/");
        assert!(target.is_none());
    }
}
