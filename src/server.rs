use crate::dispatcher::Dispatcher;
use crate::tools::{ToolDefinition, ToolResponse};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// MCP server backed by the tool dispatcher
#[derive(Clone)]
pub struct CalendlyServer {
    dispatcher: Arc<Dispatcher>,
}

impl CalendlyServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

fn to_tool(definition: ToolDefinition) -> Tool {
    let schema = match definition.input_schema {
        Value::Object(map) => map,
        _ => Default::default(),
    };
    Tool::new(definition.name, definition.description, Arc::new(schema))
}

fn to_result(response: ToolResponse) -> CallToolResult {
    CallToolResult::success(
        response
            .content
            .into_iter()
            .map(|block| Content::text(block.text))
            .collect(),
    )
}

impl ServerHandler for CalendlyServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Tools for the Calendly scheduling API: list, inspect, cancel and schedule events, \
                 browse event types and availability, and manage OAuth tokens."
                    .to_string(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.dispatcher.list_tools().into_iter().map(to_tool).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("tools/call {}", request.name);
        match self.dispatcher.call(&request.name, request.arguments).await {
            Ok(response) => Ok(to_result(response)),
            Err(e) if e.is_caller_error() => Err(McpError::invalid_params(e.to_string(), None)),
            Err(e) => {
                error!("Tool {} failed: {}", request.name, e);
                Err(McpError::internal_error(
                    format!("Calendly API error: {}", e),
                    None,
                ))
            }
        }
    }
}
