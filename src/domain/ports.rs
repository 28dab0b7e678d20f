use super::command::{Command, MethodKind};
use super::parameters::{GatewayResponse, ValidatedParameters};
use super::validation::Schema;
use crate::error::TransportError;
use async_trait::async_trait;

/// Network side of the gateway. Implementations own timeouts and any
/// retry policy; errors are passed to the caller unchanged.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn authorize_transaction(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError>;
    async fn check_status(
        &self,
        params: ValidatedParameters,
    ) -> Result<GatewayResponse, TransportError>;
}

/// Source of the field rules for each command.
pub trait ValidationRules: Send + Sync {
    fn schema(&self, command: Command, method: MethodKind) -> Schema;
}

pub type GatewayClientBox = Box<dyn GatewayClient>;
pub type ValidationRulesBox = Box<dyn ValidationRules>;
