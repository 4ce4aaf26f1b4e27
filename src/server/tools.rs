//! MCP Server tools and prompts for xiao liu ren readings

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use rmcp::{
    RoleServer, ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, GetPromptRequestParam, GetPromptResult,
        Implementation, JsonObject, ListPromptsResult, ListToolsResult, PaginatedRequestParam, Prompt,
        PromptArgument, PromptMessage, PromptMessageRole, ProtocolVersion, ServerCapabilities,
        ServerInfo, Tool,
    },
    schemars::{self, schema_for},
    service::RequestContext,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::divination::{predict_async, Interpreter, PredictionTable};
use crate::models::{HelloResponse, PredictionSummary};

use super::prompts::{call_hello_multiple, CallHelloMultipleArgs, DEFAULT_HELLO_TIMES};
use super::sampling::SamplingInterpreter;

/// Input for the hello tool
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct HelloInput {
    #[schemars(description = "The name of the person to greet")]
    pub name: String,
}

/// Input for a xiao liu ren reading
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct PredictInput {
    #[schemars(description = "First number (positive integer), counted from 大安")]
    pub num1: i64,
    #[schemars(description = "Second number (positive integer), counted from the first transmission")]
    pub num2: i64,
    #[schemars(description = "Third number (positive integer), counted from the second transmission")]
    pub num3: i64,
    #[schemars(description = "Optional question; when given, the client is asked to interpret the reading")]
    pub question: Option<String>,
    #[schemars(description = "Optional model name hinted to the client when sampling the interpretation (e.g., 'gpt-4o')")]
    pub model: Option<String>,
}

/// Response for a xiao liu ren reading
#[derive(Debug, Clone, Serialize, schemars::JsonSchema)]
pub struct PredictResponse {
    pub success: bool,
    pub prediction: PredictionSummary,
    pub table: PredictionTable,
    /// Plain-text rendering of `table`
    pub rendered: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation_error: Option<String>,
}

fn schema_to_value<T: schemars::JsonSchema>() -> Arc<serde_json::Map<String, Value>> {
    let schema = schema_for!(T);
    match serde_json::to_value(schema) {
        Ok(Value::Object(map)) => Arc::new(map),
        _ => Arc::new(serde_json::Map::new()),
    }
}

fn prompt_argument(name: &str, description: &str, required: bool) -> Option<PromptArgument> {
    serde_json::from_value(json!({
        "name": name,
        "description": description,
        "required": required,
    }))
    .ok()
}

fn invalid_params(e: impl std::fmt::Display) -> rmcp::ErrorData {
    rmcp::ErrorData::invalid_params(e.to_string(), None)
}

/// Decode tool or prompt arguments, treating absent arguments as an empty object
fn decode_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, rmcp::ErrorData> {
    serde_json::from_value(Value::Object(arguments.unwrap_or_default())).map_err(invalid_params)
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        json!({
            "success": false,
            "error": format!("Failed to serialize response: {}", e)
        })
        .to_string()
    })
}

/// Per-tool invocation counters, active when metrics are enabled
#[derive(Debug, Default)]
struct ToolMetrics {
    calls: Mutex<HashMap<String, u64>>,
}

impl ToolMetrics {
    fn record(&self, tool: &str) -> u64 {
        let mut calls = self.calls.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            tracing::warn!("Tool metrics lock poisoned, recovering counters");
            poisoned.into_inner()
        });
        let count = calls.entry(tool.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

/// MCP Server for xiao liu ren readings
#[derive(Clone)]
pub struct LiurenServer {
    settings: Arc<Settings>,
    metrics: Arc<ToolMetrics>,
}

impl LiurenServer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
            metrics: Arc::new(ToolMetrics::default()),
        }
    }

    fn hello(&self, input: HelloInput) -> String {
        let response = HelloResponse::greet(
            &input.name,
            &self.settings.server_name,
            &self.settings.server_version,
            Utc::now(),
        );
        to_pretty_json(&response)
    }

    async fn xiaoliuren_predict(&self, input: PredictInput, interpreter: &dyn Interpreter) -> String {
        let reading = match predict_async(
            input.num1,
            input.num2,
            input.num3,
            input.question.as_deref(),
            interpreter,
        )
        .await
        {
            Ok(r) => r,
            Err(e) => {
                return json!({
                    "success": false,
                    "error": e.to_string()
                })
                .to_string()
            }
        };

        let (interpretation, interpretation_error) = match reading.interpretation {
            Some(Ok(text)) => (Some(text), None),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Interpretation failed, returning table only");
                (None, Some(e.to_string()))
            }
            None => (None, None),
        };

        let response = PredictResponse {
            success: true,
            prediction: PredictionSummary::from(&reading.prediction),
            rendered: reading.table.to_string(),
            table: reading.table,
            interpretation,
            interpretation_error,
        };

        to_pretty_json(&response)
    }

    fn hello_prompt(&self, args: CallHelloMultipleArgs) -> GetPromptResult {
        let text = call_hello_multiple(
            &args.name,
            args.times.unwrap_or(DEFAULT_HELLO_TIMES),
            self.settings.max_prompt_calls,
        );

        GetPromptResult {
            description: Some("Call the hello tool several times".to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        }
    }

    fn get_tools(&self) -> Vec<Tool> {
        vec![
            Tool::new(
                "hello",
                "Say hello to someone. Returns a greeting with status, message and server metadata.",
                schema_to_value::<HelloInput>(),
            ),
            Tool::new(
                "xiaoliuren_predict",
                "Cast a xiao liu ren (小六壬) three-transmission reading from three positive numbers. \
                 Returns the three palaces with their five-element attributes, the generate/overcome \
                 relations between them, and a rendered table. If a question is given, the client is \
                 asked to interpret the reading.",
                schema_to_value::<PredictInput>(),
            ),
        ]
    }

    fn get_prompts(&self) -> Vec<Prompt> {
        let arguments = [
            prompt_argument("name", "The name to use in the hello calls", true),
            prompt_argument("times", "Number of times to call hello (default: 3)", false),
        ]
        .into_iter()
        .flatten()
        .collect();

        vec![Prompt::new(
            "call_hello_multiple",
            Some("Generate a prompt to call the hello tool multiple times"),
            Some(arguments),
        )]
    }

    fn record_call(&self, tool: &str) {
        if self.settings.enable_metrics {
            let count = self.metrics.record(tool);
            tracing::info!(tool, count, "Tool invoked");
        }
    }
}

impl ServerHandler for LiurenServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.settings.server_name.clone(),
                version: self.settings.server_version.clone(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Xiao liu ren (小六壬) divination server. Use xiaoliuren_predict with three positive \
                 numbers to cast a reading, optionally with a question to receive an interpretation. \
                 The hello tool and the call_hello_multiple prompt exercise the server."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::ErrorData> {
        Ok(ListToolsResult {
            tools: self.get_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::ErrorData> {
        let CallToolRequestParam { name, arguments, .. } = request;
        tracing::debug!(tool = %name, "Tool call");

        let result = match name.as_ref() {
            "hello" => {
                let input: HelloInput = decode_args(arguments)?;
                self.hello(input)
            }
            "xiaoliuren_predict" => {
                let input: PredictInput = decode_args(arguments)?;
                let interpreter = SamplingInterpreter::new(
                    context.peer.clone(),
                    self.settings.interpretation_max_tokens,
                )
                .with_model(input.model.clone());
                self.xiaoliuren_predict(input, &interpreter).await
            }
            _ => {
                return Err(rmcp::ErrorData::invalid_params(
                    format!("Unknown tool: {}", name),
                    None,
                ))
            }
        };

        self.record_call(&name);

        Ok(CallToolResult::success(vec![Content::text(result)]))
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, rmcp::ErrorData> {
        Ok(ListPromptsResult {
            prompts: self.get_prompts(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, rmcp::ErrorData> {
        match request.name.as_str() {
            "call_hello_multiple" => {
                let args: CallHelloMultipleArgs = decode_args(request.arguments)?;
                Ok(self.hello_prompt(args))
            }
            _ => Err(rmcp::ErrorData::invalid_params(
                format!("Unknown prompt: {}", request.name),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::{Error, Result};
    use crate::models::Prediction;

    struct Fixed;

    #[async_trait]
    impl Interpreter for Fixed {
        async fn interpret(&self, prediction: &Prediction, question: &str) -> Result<String> {
            Ok(format!("{} answers {}", prediction.last(), question))
        }
    }

    struct Unavailable;

    #[async_trait]
    impl Interpreter for Unavailable {
        async fn interpret(&self, _prediction: &Prediction, _question: &str) -> Result<String> {
            Err(Error::Interpretation("client does not support sampling".to_string()))
        }
    }

    fn server() -> LiurenServer {
        LiurenServer::new(Settings::default())
    }

    fn input(question: Option<&str>) -> PredictInput {
        PredictInput {
            num1: 9,
            num2: 9,
            num3: 9,
            question: question.map(str::to_string),
            model: None,
        }
    }

    #[test]
    fn test_hello_tool() {
        let output: Value = serde_json::from_str(&server().hello(HelloInput {
            name: "Claude".to_string(),
        }))
        .unwrap();

        assert_eq!(output["status"], "success");
        assert_eq!(output["name"], "Claude");
        assert_eq!(output["metadata"]["server"], "LiurenMCP");
    }

    #[tokio::test]
    async fn test_predict_without_question() {
        let output: Value =
            serde_json::from_str(&server().xiaoliuren_predict(input(None), &Fixed).await).unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["prediction"]["initial"]["name"], "天德");
        assert_eq!(output["prediction"]["middle"]["element"], "wood");
        assert_eq!(output["prediction"]["relations"][1]["label"], "克");
        assert_eq!(output["table"]["rows"][0][4], "【病符】");
        assert!(output.get("interpretation").is_none());
    }

    #[tokio::test]
    async fn test_predict_with_question() {
        let server = server();
        let plain: Value =
            serde_json::from_str(&server.xiaoliuren_predict(input(None), &Fixed).await).unwrap();
        let asked: Value = serde_json::from_str(
            &server.xiaoliuren_predict(input(Some("能否成功？")), &Fixed).await,
        )
        .unwrap();

        assert_eq!(asked["interpretation"], "病符 answers 能否成功？");
        assert_eq!(asked["table"], plain["table"]);
    }

    #[tokio::test]
    async fn test_predict_interpretation_failure_keeps_table() {
        let output: Value = serde_json::from_str(
            &server()
                .xiaoliuren_predict(input(Some("q")), &Unavailable)
                .await,
        )
        .unwrap();

        assert_eq!(output["success"], true);
        assert_eq!(output["table"]["rows"][0][0], "【天德】");
        assert!(output["interpretation_error"]
            .as_str()
            .unwrap()
            .contains("does not support sampling"));
    }

    #[tokio::test]
    async fn test_predict_rejects_zero() {
        let mut bad = input(None);
        bad.num3 = 0;
        let output: Value =
            serde_json::from_str(&server().xiaoliuren_predict(bad, &Fixed).await).unwrap();

        assert_eq!(output["success"], false);
        assert_eq!(output["error"], "num3 must be a positive integer, got 0");
    }

    #[test]
    fn test_hello_prompt_respects_max_calls() {
        let server = LiurenServer::new(Settings {
            max_prompt_calls: 2,
            ..Settings::default()
        });
        let result = server.hello_prompt(CallHelloMultipleArgs {
            name: "Ann".to_string(),
            times: Some(5),
        });

        assert_eq!(result.messages.len(), 1);
        let text = serde_json::to_value(&result.messages[0]).unwrap()["content"]["text"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(text.matches("hello(\"Ann\")").count(), 2);
    }

    #[test]
    fn test_tool_and_prompt_listing() {
        let server = server();
        let tools: Vec<String> = server
            .get_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(tools, ["hello", "xiaoliuren_predict"]);

        let prompts = server.get_prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "call_hello_multiple");
        assert_eq!(prompts[0].arguments.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_decode_args() {
        let mut arguments = JsonObject::new();
        arguments.insert("num1".into(), json!(3));
        arguments.insert("num2".into(), json!(4));
        arguments.insert("num3".into(), json!(5));
        arguments.insert("model".into(), json!("gpt-4o"));

        let input: PredictInput = decode_args(Some(arguments)).unwrap();
        assert_eq!((input.num1, input.num2, input.num3), (3, 4, 5));
        assert_eq!(input.model.as_deref(), Some("gpt-4o"));
        assert_eq!(input.question, None);

        let err = decode_args::<HelloInput>(None).unwrap_err();
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_metrics_survive_poisoned_lock() {
        let metrics = Arc::new(ToolMetrics::default());
        metrics.record("hello");

        let poisoner = Arc::clone(&metrics);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.calls.lock().unwrap();
            panic!("worker died holding the metrics lock");
        })
        .join();

        assert!(metrics.calls.is_poisoned());
        assert_eq!(metrics.record("hello"), 2);
    }

    #[test]
    fn test_metrics_count_per_tool() {
        let metrics = ToolMetrics::default();
        assert_eq!(metrics.record("hello"), 1);
        assert_eq!(metrics.record("hello"), 2);
        assert_eq!(metrics.record("xiaoliuren_predict"), 1);
    }
}
