use crate::utils::error::Result;
use async_trait::async_trait;

/// Seam to the external text-generation service. The engine hands over a
/// fully-built prompt and gets raw textual content back; everything else
/// (transport, authentication, model selection) lives behind the adapter.
#[async_trait]
pub trait AnalysisGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
