//! MCP protocol handler over the review dispatcher.

use std::sync::Arc;

use review_engine::tools::{JsonObject, ToolDescriptor};
use review_engine::{DispatchError, Dispatcher, Error, ResourceDescriptor};
use rmcp::model::{
    AnnotateAble, CallToolRequestParams, CallToolResult, Content, Implementation,
    ListResourcesResult, ListToolsResult, PaginatedRequestParams, ProtocolVersion,
    RawResource, ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents,
    ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use tracing::debug;

#[derive(Clone)]
pub struct ReviewServer {
    dispatcher: Arc<Dispatcher>,
}

impl ReviewServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let text = self
            .dispatcher
            .invoke(name, arguments)
            .await
            .map_err(dispatch_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    async fn read(&self, uri: &str) -> Result<ReadResourceResult, McpError> {
        let body = self
            .dispatcher
            .read_resource(uri)
            .await
            .map_err(|e| {
                if matches!(e, Error::InvalidResourceUri(_)) {
                    McpError::invalid_request(e.to_string(), None)
                } else {
                    McpError::internal_error(e.to_string(), None)
                }
            })?;

        let mut contents = ResourceContents::text(body.text, body.uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(body.mime_type.to_string());
        }
        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}

fn dispatch_error(err: DispatchError) -> McpError {
    let message = err.to_string();
    match &err {
        DispatchError::MissingArguments => McpError::invalid_request(message, None),
        DispatchError::UnknownTool(_) => McpError::invalid_params(message, None),
        DispatchError::Tool { source, .. } if source.is_invalid_request() => {
            McpError::invalid_params(message, None)
        }
        DispatchError::Tool { .. } => McpError::internal_error(message, None),
    }
}

fn to_tool(descriptor: &ToolDescriptor) -> Tool {
    let mut tool = Tool::new(
        descriptor.name,
        descriptor.description,
        Arc::new(descriptor.input_schema.clone()),
    );
    tool.annotations = Some(ToolAnnotations {
        read_only_hint: Some(descriptor.read_only),
        destructive_hint: Some(descriptor.destructive),
        ..Default::default()
    });
    tool
}

fn to_resource(descriptor: &ResourceDescriptor) -> Resource {
    let mut resource = RawResource::new(descriptor.uri, descriptor.name);
    resource.description = Some(descriptor.description.to_string());
    resource.mime_type = Some(descriptor.mime_type.to_string());
    resource.no_annotation()
}

impl ServerHandler for ReviewServer {
    fn get_info(&self) -> ServerInfo {
        let mode = if self.dispatcher.is_read_only() {
            " (read-only)"
        } else {
            ""
        };
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Anki flashcard review via AnkiConnect{mode}. \
                 Requires Anki to be running with the AnkiConnect add-on installed. \
                 Read the due or new card resources, quiz the user one card at a time, \
                 then record their answers with update_cards."
            )),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.dispatcher.resources().iter().map(to_resource).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        debug!(uri = %request.uri, "Reading resource");
        self.read(&request.uri).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.dispatcher.tools().map(to_tool).collect(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}
