//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes syllable counting over the MCP protocol on stdio, so AI assistants
//! can count or syllabify words against the same reference data the CLI
//! uses.
//!
//! The server holds one [`SyllableCounter`] behind an [`Arc`]; reference data
//! is loaded once at startup and every tool call is read-only.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use sylba_core::{SyllableCount, SyllableCounter};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `count_syllables` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct CountSyllablesParams {
    /// Words to count.
    pub words: Vec<String>,
}

/// Parameters for the `syllabify` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct SyllabifyParams {
    /// The word to syllabify.
    pub word: String,
    /// How many ranked hyphenations to return (default 1).
    pub top: Option<usize>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum CountRow {
    Counted(SyllableCount),
    Failed { word: String, error: String },
}

/// MCP server answering syllable queries.
#[derive(Clone)]
pub struct SyllableServer {
    counter: Arc<SyllableCounter>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

#[tool_router]
impl SyllableServer {
    /// Create a server over a loaded counter.
    pub fn new(counter: SyllableCounter) -> Self {
        Self {
            counter: Arc::new(counter),
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get server name, version, and the size of the loaded reference data")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let store = self.counter.store();
        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "reference_entries": store.entries().len(),
            "known_words": store.word_count(),
        });

        let text = if params.format == "json" {
            serde_json::to_string_pretty(&info)
                .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?
        } else {
            format!(
                "{} v{}\n{}\n{} reference entries, {} known words",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
                store.entries().len(),
                store.word_count(),
            )
        };

        tracing::info!(tool = "get_info", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Count syllables in each word.
    #[tool(
        description = "Count syllables in English words. Known words use the dictionary; unknown words are syllabified by analogy."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", words = params.words.len()))]
    fn count_syllables(
        &self,
        Parameters(params): Parameters<CountSyllablesParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "count_syllables", "executing MCP tool");
        if params.words.is_empty() {
            return Err(McpError::invalid_params("words must not be empty", None));
        }

        let rows: Vec<CountRow> = params
            .words
            .iter()
            .map(|word| match self.counter.count(word) {
                Ok(count) => CountRow::Counted(count),
                Err(err) => CountRow::Failed {
                    word: word.clone(),
                    error: err.to_string(),
                },
            })
            .collect();
        let json = serde_json::to_string_pretty(&rows)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;

        tracing::info!(tool = "count_syllables", "MCP tool completed");
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Syllabify one word by analogy.
    #[tool(
        description = "Syllabify a word by analogy with the reference lexicon. Returns the winning hyphenation ('-' marks a syllable break) and the ranked alternatives."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server", word = %params.word))]
    fn syllabify(
        &self,
        Parameters(params): Parameters<SyllabifyParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "syllabify", top = ?params.top, "executing MCP tool");

        let mut result = match self.counter.syllabify(&params.word) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(tool = "syllabify", error = %err, "no syllabification");
                return Ok(CallToolResult::error(vec![Content::text(err.to_string())]));
            }
        };
        result.ranking.truncate(params.top.unwrap_or(1).max(1));

        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))?;
        tracing::info!(
            tool = "syllabify",
            syllables = result.syllables,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

#[tool_handler]
impl ServerHandler for SyllableServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use count_syllables for syllable counts and syllabify to see where the breaks fall.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
