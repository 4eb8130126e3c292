//! Routing of named tool calls and resource reads.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::backend::Backend;
use crate::error::{DispatchError, Error};
use crate::resources::{self, ResourceBody, ResourceDescriptor};
use crate::tools::{JsonObject, ToolDescriptor, ToolRegistry};

/// Single entry point for every tool call.
///
/// Holds the backend handle and the registry, both fixed after startup, so a
/// dispatcher can be shared across concurrent calls behind an `Arc`.
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    tools: ToolRegistry,
    read_only: bool,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn Backend>, tools: ToolRegistry) -> Self {
        Self {
            backend,
            tools,
            read_only: false,
        }
    }

    /// Reject tools that change the collection.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Descriptors of all tools, in declaration order.
    pub fn tools(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.descriptors()
    }

    pub fn resources(&self) -> &'static [ResourceDescriptor] {
        resources::list_resources()
    }

    pub async fn read_resource(&self, uri: &str) -> crate::Result<ResourceBody> {
        resources::read_resource(self.backend.as_ref(), uri).await
    }

    /// Run the tool `name` with the given argument bag.
    ///
    /// A call without an argument bag fails before the name is even looked
    /// at. Every failure after that names the tool.
    pub async fn invoke(
        &self,
        name: &str,
        args: Option<JsonObject>,
    ) -> Result<String, DispatchError> {
        let args = args.ok_or(DispatchError::MissingArguments)?;
        let (descriptor, handler) = self
            .tools
            .get(name)
            .ok_or_else(|| DispatchError::UnknownTool(name.to_string()))?;

        if self.read_only && !descriptor.read_only {
            warn!(tool = name, "Blocked write operation in read-only mode");
            return Err(DispatchError::Tool {
                name: name.to_string(),
                source: Error::ReadOnly(descriptor.name),
            });
        }

        debug!(tool = name, "Calling tool");
        handler
            .call(self.backend.as_ref(), args)
            .await
            .map_err(|source| {
                warn!(tool = name, error = %source, "Tool failed");
                DispatchError::Tool {
                    name: name.to_string(),
                    source,
                }
            })
    }
}
