//! Scripted Jolokia agent served by wiremock.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// One memory pool exposed by the fake agent.
#[derive(Clone)]
pub struct FakePool {
    pub name: &'static str,
    pub pool_type: &'static str,
    pub peak: Value,
    /// `None` answers `UsageThreshold` with `UnsupportedOperationException`.
    pub threshold: Option<i64>,
}

impl FakePool {
    fn mbean(&self) -> String {
        format!("java.lang:name={},type=MemoryPool", self.name)
    }
}

/// Pool layout of a HotSpot JVM on the parallel collector.
pub fn parallel_gc(tenured_peak: Value, threshold: Option<i64>) -> Vec<FakePool> {
    let small = json!({"init": 2_621_440, "committed": 2_621_440, "max": -1, "used": 1_310_720});
    vec![
        FakePool {
            name: "Code Cache",
            pool_type: "NON_HEAP",
            peak: small.clone(),
            threshold: Some(0),
        },
        FakePool {
            name: "PS Eden Space",
            pool_type: "HEAP",
            peak: small.clone(),
            threshold: None,
        },
        FakePool {
            name: "PS Survivor Space",
            pool_type: "HEAP",
            peak: small,
            threshold: None,
        },
        FakePool {
            name: "PS Old Gen",
            pool_type: "HEAP",
            peak: tenured_peak,
            threshold,
        },
    ]
}

struct Agent {
    pools: Vec<FakePool>,
}

impl Agent {
    fn answer(&self, request: &Value) -> Value {
        match request["type"].as_str() {
            Some("version") => json!({"status": 200, "value": {"agent": "1.7.2", "protocol": "7.2"}}),
            Some("search") => json!({
                "status": 200,
                "value": self.pools.iter().map(FakePool::mbean).collect::<Vec<_>>(),
            }),
            Some("read") => {
                let mbean = request["mbean"].as_str().unwrap_or_default();
                let Some(pool) = self.pools.iter().find(|p| p.mbean() == mbean) else {
                    return json!({
                        "status": 404,
                        "error_type": "javax.management.InstanceNotFoundException",
                        "error": format!("javax.management.InstanceNotFoundException : {mbean}"),
                    });
                };
                match request["attribute"].as_str() {
                    None => json!({"status": 200, "value": {"Name": pool.name, "Type": pool.pool_type}}),
                    Some("PeakUsage") => json!({"status": 200, "value": pool.peak}),
                    Some("UsageThreshold") => match pool.threshold {
                        Some(threshold) => json!({"status": 200, "value": threshold}),
                        None => json!({
                            "status": 500,
                            "error_type": "java.lang.UnsupportedOperationException",
                            "error": "java.lang.UnsupportedOperationException : Usage threshold is not supported",
                        }),
                    },
                    Some(other) => json!({
                        "status": 404,
                        "error_type": "javax.management.AttributeNotFoundException",
                        "error": format!("No such attribute: {other}"),
                    }),
                }
            }
            _ => json!({"status": 400, "error_type": "java.lang.IllegalArgumentException", "error": "bad request"}),
        }
    }
}

impl Respond for Agent {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match serde_json::from_slice::<Value>(&request.body) {
            Ok(Value::Array(requests)) => {
                let answers: Vec<Value> = requests.iter().map(|r| self.answer(r)).collect();
                ResponseTemplate::new(200).set_body_json(answers)
            }
            _ => ResponseTemplate::new(400),
        }
    }
}

/// Start a mock server answering Jolokia requests at `/jolokia/`.
pub async fn start_agent(pools: Vec<FakePool>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jolokia/"))
        .respond_with(Agent { pools })
        .mount(&server)
        .await;
    server
}
