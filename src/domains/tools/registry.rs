//! Tool Registry - registration and dispatch for all tools.
//!
//! `register` binds a name, a parameter type and an async handler. Each
//! invocation deserializes the raw arguments into the parameter type, runs
//! the handler once with a client handle, and converts whatever happens
//! into a [`ToolOutcome`]. Handler errors and panics never escape: the
//! host always receives an envelope.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use super::error::ToolError;
use super::outcome::{ToolFailure, ToolOutcome};
use super::schema::ToolSchema;
use crate::api::SharedClient;

/// Result type for tool table operations.
pub type ToolResult<T> = Result<T, ToolError>;

type ErasedHandler =
    dyn Fn(JsonObject, SharedClient) -> ToolResult<BoxFuture<'static, ToolOutcome>> + Send + Sync;

/// A single registered tool.
pub struct ToolRegistration {
    name: String,
    description: String,
    schema: ToolSchema,
    handler: Arc<ErasedHandler>,
}

impl ToolRegistration {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Create a Tool model for this registration (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: self.schema.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Tool registry - the server's tool table.
///
/// Filled once at startup, then shared behind an `Arc` and only read.
pub struct ToolRegistry {
    client: SharedClient,
    tools: Vec<ToolRegistration>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry whose tools call the API through `client`.
    pub fn new(client: SharedClient) -> Self {
        Self {
            client,
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool.
    ///
    /// `P` is the input schema: arguments are accepted when they
    /// deserialize into it, and its JSON schema is advertised to clients.
    pub fn register<P, T, F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> ToolResult<()>
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        T: Serialize + Send + 'static,
        F: Fn(P, SharedClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.register_with_schema(name, description, ToolSchema::of::<P>(), handler)
    }

    /// Register a tool with an explicitly supplied schema.
    ///
    /// Arguments are still validated by deserializing into `P`.
    pub fn register_with_schema<P, T, F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        schema: ToolSchema,
        handler: F,
    ) -> ToolResult<()>
    where
        P: DeserializeOwned + Send + 'static,
        T: Serialize + Send + 'static,
        F: Fn(P, SharedClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }

        let handler = Arc::new(handler);
        let tool_name = name.clone();
        let erased = move |args: JsonObject,
                           client: SharedClient|
              -> ToolResult<BoxFuture<'static, ToolOutcome>> {
            let params: P = serde_json::from_value(Value::Object(args))
                .map_err(|e| ToolError::invalid_arguments(&tool_name, e.to_string()))?;

            // The handler's synchronous part runs inside the task too, so a
            // panic anywhere in it surfaces as a JoinError.
            let handler = handler.clone();
            let invocation = tokio::spawn(async move { handler(params, client).await });
            let tool_name = tool_name.clone();
            Ok(async move {
                let outcome = match invocation.await {
                    Ok(Ok(value)) => ToolOutcome::success(&value),
                    Ok(Err(e)) => ToolOutcome::Failure(ToolFailure::from_error(&e)),
                    Err(e) => {
                        let failure = ToolFailure::unknown();
                        error!(
                            tool = %tool_name,
                            "Error in {} tool: {} ({})", tool_name, failure.error, e
                        );
                        return ToolOutcome::Failure(failure);
                    }
                };
                if let ToolOutcome::Failure(failure) = &outcome {
                    error!(tool = %tool_name, "Error in {} tool: {}", tool_name, failure.error);
                }
                outcome
            }
            .boxed())
        };

        self.index.insert(name.clone(), self.tools.len());
        self.tools.push(ToolRegistration {
            name,
            description: description.into(),
            schema,
            handler: Arc::new(erased),
        });
        Ok(())
    }

    /// Look up a registration by name.
    pub fn get(&self, name: &str) -> Option<&ToolRegistration> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// All registrations, in registration order.
    pub fn registrations(&self) -> &[ToolRegistration] {
        &self.tools
    }

    /// Get all tool names, in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolRegistration::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Invoke a tool with the registry's client.
    pub async fn invoke(&self, name: &str, arguments: JsonObject) -> ToolResult<ToolOutcome> {
        self.invoke_with(name, arguments, self.client.clone()).await
    }

    /// Invoke a tool with an explicit client handle.
    ///
    /// Errors only for host-level problems (unknown tool, arguments that do
    /// not match the schema). Handler failures come back as
    /// `Ok(ToolOutcome::Failure(_))`.
    pub async fn invoke_with(
        &self,
        name: &str,
        arguments: JsonObject,
        client: SharedClient,
    ) -> ToolResult<ToolOutcome> {
        let registration = self.get(name).ok_or_else(|| {
            warn!("Unknown tool requested: {}", name);
            ToolError::not_found(name)
        })?;

        let invocation = (registration.handler)(arguments, client).inspect_err(|e| {
            warn!(tool = %name, "Rejected tool arguments: {}", e);
        })?;
        Ok(invocation.await)
    }

    /// Invoke a tool and wrap the outcome into the MCP result envelope.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> ToolResult<CallToolResult> {
        Ok(self.invoke(name, arguments).await?.into_call_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingClient;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
    struct EchoParams {
        message: String,
        #[serde(default)]
        repeat: u32,
    }

    fn args(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn registry_with(client: &Arc<RecordingClient>) -> ToolRegistry {
        ToolRegistry::new(client.shared())
    }

    #[tokio::test]
    async fn test_handler_called_once_with_parsed_args_and_client() {
        let client = RecordingClient::responding(json!({ "status_code": 20000 }));
        let mut registry = registry_with(&client);
        let seen: Arc<Mutex<Vec<EchoParams>>> = Arc::default();

        let recorder = seen.clone();
        registry
            .register("echo", "Echo through the API", move |params: EchoParams, client| {
                recorder.lock().unwrap().push(params.clone());
                async move { Ok(client.get(&format!("/echo/{}", params.message)).await?) }
            })
            .unwrap();

        let outcome = registry
            .invoke("echo", args(json!({ "message": "hi", "repeat": 2 })))
            .await
            .unwrap();

        assert_eq!(outcome, ToolOutcome::Success(json!({ "status_code": 20000 })));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![EchoParams {
                message: "hi".to_string(),
                repeat: 2
            }]
        );
        assert_eq!(client.calls().len(), 1);
        assert_eq!(client.calls()[0].path, "/echo/hi");
    }

    #[tokio::test]
    async fn test_invoke_with_uses_supplied_client() {
        let default_client = RecordingClient::responding(json!("default"));
        let request_client = RecordingClient::responding(json!("request"));
        let mut registry = registry_with(&default_client);
        registry
            .register("ping", "Ping", |_: EchoParams, client| async move {
                Ok(client.get("/ping").await?)
            })
            .unwrap();

        let outcome = registry
            .invoke_with("ping", args(json!({ "message": "x" })), request_client.shared())
            .await
            .unwrap();

        assert_eq!(outcome, ToolOutcome::Success(json!("request")));
        assert!(default_client.calls().is_empty());
        assert_eq!(request_client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_success_envelope_text() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        registry
            .register("task", "Task", |_: EchoParams, _| async {
                Ok(json!({ "taskId": "abc" }))
            })
            .unwrap();

        let result = registry
            .call_tool("task", args(json!({ "message": "go" })))
            .await
            .unwrap();

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {:?}", other),
        };
        assert_eq!(text, "{\n  \"taskId\": \"abc\"\n}");
    }

    #[tokio::test]
    async fn test_handler_error_is_captured() {
        let client = RecordingClient::failing(500);
        let mut registry = registry_with(&client);
        registry
            .register("broken", "Broken", |_: EchoParams, client| async move {
                Ok(client.get("/broken").await?)
            })
            .unwrap();

        let outcome = registry
            .invoke("broken", args(json!({ "message": "x" })))
            .await
            .unwrap();

        match outcome {
            ToolOutcome::Failure(failure) => {
                assert_eq!(
                    failure.error,
                    "DataForSEO API returned status 500: mock failure"
                );
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handler_panic_reports_unknown_error() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        registry
            .register("panics", "Panics", |_: EchoParams, _| async {
                if true {
                    panic!("not an error value");
                }
                Ok(Value::Null)
            })
            .unwrap();

        let result = registry
            .call_tool("panics", args(json!({ "message": "x" })))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        let outcome = registry
            .invoke("panics", args(json!({ "message": "x" })))
            .await
            .unwrap();
        assert_eq!(outcome, ToolOutcome::Failure(ToolFailure::unknown()));
    }

    #[derive(Debug, Deserialize, JsonSchema)]
    struct ListParams {
        items: Vec<String>,
    }

    #[tokio::test]
    async fn test_synchronous_panic_reports_unknown_error() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        registry
            .register("first", "First item", |params: ListParams, _| {
                let first = params.items[0].clone();
                async move { Ok(first) }
            })
            .unwrap();

        let outcome = registry
            .invoke("first", args(json!({ "items": [] })))
            .await
            .unwrap();
        assert_eq!(outcome, ToolOutcome::Failure(ToolFailure::unknown()));

        let outcome = registry
            .invoke("first", args(json!({ "items": ["a"] })))
            .await
            .unwrap();
        assert_eq!(outcome, ToolOutcome::Success(json!("a")));
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn error_lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8_lossy(&bytes)
                .lines()
                .filter(|line| line.contains("ERROR"))
                .map(str::to_string)
                .collect()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_one_error_log_per_failed_invocation() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let client = RecordingClient::failing(500);
        let mut registry = registry_with(&client);
        registry
            .register("broken", "Broken", |_: EchoParams, client| async move {
                Ok(client.get("/broken").await?)
            })
            .unwrap();
        registry
            .register("first", "First item", |params: ListParams, _| {
                let first = params.items[0].clone();
                async move { Ok(first) }
            })
            .unwrap();
        registry
            .register("fine", "Fine", |_: EchoParams, _| async { Ok(Value::Null) })
            .unwrap();

        registry
            .invoke("fine", args(json!({ "message": "x" })))
            .await
            .unwrap();
        assert!(logs.error_lines().is_empty());

        registry
            .invoke("broken", args(json!({ "message": "x" })))
            .await
            .unwrap();
        let lines = logs.error_lines();
        assert_eq!(lines.len(), 1, "{:?}", lines);
        assert!(lines[0].contains("tool=broken"));

        registry
            .invoke("first", args(json!({ "items": [] })))
            .await
            .unwrap();
        let lines = logs.error_lines();
        assert_eq!(lines.len(), 2, "{:?}", lines);
        assert!(lines[1].contains("tool=first"));
        assert!(lines[1].contains("Unknown error occurred"));
    }

    #[tokio::test]
    async fn test_invalid_arguments_skip_handler() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        registry
            .register("echo", "Echo", move |_: EchoParams, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(Value::Null) }
            })
            .unwrap();

        let result = registry.invoke("echo", args(json!({ "repeat": 1 }))).await;
        assert!(matches!(result, Err(ToolError::InvalidArguments { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let client = RecordingClient::responding(Value::Null);
        let registry = registry_with(&client);
        let result = registry.invoke("missing", JsonObject::new()).await;
        assert!(matches!(result, Err(ToolError::NotFound(name)) if name == "missing"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        registry
            .register("echo", "Echo", |_: EchoParams, _| async { Ok(Value::Null) })
            .unwrap();

        let result =
            registry.register("echo", "Again", |_: EchoParams, _| async { Ok(Value::Null) });
        assert!(matches!(result, Err(ToolError::Duplicate(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tool_metadata() {
        let client = RecordingClient::responding(Value::Null);
        let mut registry = registry_with(&client);
        registry
            .register("echo", "Echo a message", |_: EchoParams, _| async {
                Ok(Value::Null)
            })
            .unwrap();

        let tools = registry.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "echo");
        assert_eq!(tools[0].description.as_deref(), Some("Echo a message"));
        assert_eq!(tools[0].input_schema["required"], json!(["message"]));
        assert!(registry.get("echo").unwrap().schema().is_shape());
    }
}
