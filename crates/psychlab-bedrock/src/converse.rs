//! Report generation over the Bedrock Converse API.
//!
//! The response schema is declared as the input schema of a single tool,
//! `emit_report`, and the model is forced to call it. The tool-use input is
//! the structured reply; it is serialized back to JSON text so that decoding
//! stays identical for every `ReportModel`.
//!
//! Anthropic models reject forced tool use when extended thinking is
//! enabled, so with a reasoning budget the tool choice is `auto` and the
//! prompt asks for the tool by name. A plain-text reply is passed through.

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    AutoToolChoice, ContentBlock, ConversationRole, InferenceConfiguration, Message,
    SpecificToolChoice, Tool, ToolChoice, ToolConfiguration, ToolInputSchema, ToolSpecification,
};
use aws_smithy_types::Document;
use serde_json::json;
use tracing::info;

use crate::client::{BoxFuture, ModelRequest, ReportModel};
use crate::document::{document_to_json, json_to_document};
use crate::error::BedrockError;

pub const REPORT_TOOL_NAME: &str = "emit_report";

/// Output ceiling for the reply itself, on top of any reasoning budget.
const REPORT_MAX_TOKENS: i32 = 8192;

pub struct BedrockReportModel {
    client: Client,
}

impl BedrockReportModel {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }

    async fn converse(&self, request: &ModelRequest) -> Result<Option<String>, BedrockError> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(request.prompt.clone()))
            .build()
            .map_err(|e| BedrockError::Request(e.to_string()))?;

        let budget = request.thinking_budget_tokens;

        let mut call = self
            .client
            .converse()
            .model_id(request.model_id.as_str())
            .messages(message)
            .tool_config(tool_configuration(request)?)
            .inference_config(InferenceConfiguration::builder().max_tokens(max_tokens(budget)).build());

        if let Some(budget) = budget {
            call = call.additional_model_request_fields(thinking_fields(budget));
        }

        let response = call
            .send()
            .await
            .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

        if let Some(usage) = response.usage() {
            info!(
                model = %request.model_id,
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "converse usage"
            );
        }

        let Some(output_message) = response.output().and_then(|o| o.as_message().ok()) else {
            return Ok(None);
        };

        reply_body(output_message.content())
    }
}

impl ReportModel for BedrockReportModel {
    fn complete<'a>(
        &'a self,
        request: &'a ModelRequest,
    ) -> BoxFuture<'a, Result<Option<String>, BedrockError>> {
        Box::pin(self.converse(request))
    }
}

fn tool_configuration(request: &ModelRequest) -> Result<ToolConfiguration, BedrockError> {
    let spec = ToolSpecification::builder()
        .name(REPORT_TOOL_NAME)
        .description("Record the generated assessment report.")
        .input_schema(ToolInputSchema::Json(json_to_document(&request.schema)))
        .build()
        .map_err(|e| BedrockError::Request(e.to_string()))?;

    let choice = if request.thinking_budget_tokens.is_some() {
        ToolChoice::Auto(AutoToolChoice::builder().build())
    } else {
        ToolChoice::Tool(
            SpecificToolChoice::builder()
                .name(REPORT_TOOL_NAME)
                .build()
                .map_err(|e| BedrockError::Request(e.to_string()))?,
        )
    };

    ToolConfiguration::builder()
        .tools(Tool::ToolSpec(spec))
        .tool_choice(choice)
        .build()
        .map_err(|e| BedrockError::Request(e.to_string()))
}

fn max_tokens(budget: Option<u32>) -> i32 {
    budget
        .and_then(|b| i32::try_from(b).ok())
        .map_or(REPORT_MAX_TOKENS, |b| b.saturating_add(REPORT_MAX_TOKENS))
}

fn thinking_fields(budget: u32) -> Document {
    json_to_document(&json!({
        "thinking": {
            "type": "enabled",
            "budget_tokens": budget
        }
    }))
}

/// Pick the reply body out of the returned content blocks: the
/// `emit_report` tool input if present, otherwise the concatenated text.
fn reply_body(blocks: &[ContentBlock]) -> Result<Option<String>, BedrockError> {
    for block in blocks {
        if let ContentBlock::ToolUse(tool_use) = block
            && tool_use.name() == REPORT_TOOL_NAME
        {
            let value = document_to_json(tool_use.input());
            return Ok(Some(serde_json::to_string(&value)?));
        }
    }

    let text = blocks
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}
