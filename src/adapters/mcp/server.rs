use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

use crate::application::WalletTools;

/// Arguments of the `transfer` tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TransferArgs {
    #[schemars(description = "Recipient wallet address")]
    pub to: String,
    #[schemars(description = "Amount in SOL")]
    pub amount: f64,
}

/// MCP front for `WalletTools`; the router maps tool names to handlers
#[derive(Clone)]
pub struct WalletMcpServer {
    tools: Arc<WalletTools>,
    tool_router: ToolRouter<Self>,
}

fn text(body: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(body.into())])
}

/// Failed tool call, reported in the result with `isError` set
fn failure(err: impl std::fmt::Display) -> CallToolResult {
    CallToolResult::error(vec![Content::text(err.to_string())])
}

#[tool_router]
impl WalletMcpServer {
    pub fn new(tools: Arc<WalletTools>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "get-latest-slot", description = "Get the latest Solana slot")]
    async fn get_latest_slot(&self) -> Result<CallToolResult, McpError> {
        Ok(match self.tools.latest_slot().await {
            Ok(slot) => text(slot),
            Err(e) => failure(e),
        })
    }

    #[tool(name = "get-wallet-address", description = "Get the address of the server's wallet")]
    async fn get_wallet_address(&self) -> Result<CallToolResult, McpError> {
        Ok(text(self.tools.wallet_address().await))
    }

    #[tool(
        name = "get-wallet-balance",
        description = "Get the wallet balance in lamports, SOL and USD"
    )]
    async fn get_wallet_balance(&self) -> Result<CallToolResult, McpError> {
        Ok(match self.tools.wallet_balance().await {
            Ok(balance) => text(balance),
            Err(e) => failure(e),
        })
    }

    #[tool(name = "transfer", description = "Transfer SOL from the wallet to a recipient address")]
    async fn transfer(
        &self,
        Parameters(TransferArgs { to, amount }): Parameters<TransferArgs>,
    ) -> Result<CallToolResult, McpError> {
        Ok(text(self.tools.transfer(&to, amount).await))
    }
}

#[tool_handler]
impl ServerHandler for WalletMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Solana wallet tools: read the latest slot, the wallet address and its balance, \
                 and transfer SOL. Amounts are in SOL."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}
