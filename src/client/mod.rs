//! Kubernetes client abstraction

use crate::error::{NdError, Result};
use kube::{config::KubeConfigOptions, Client, Config};

/// Create a Kubernetes client for the specified context.
///
/// When a context is given the kubeconfig is used directly; otherwise the
/// configuration is inferred, which prefers the in-cluster service account
/// when running inside a pod and falls back to the default kubeconfig.
pub async fn create_client(context: Option<&str>) -> Result<Client> {
    let config = load_config(context).await?;
    Client::try_from(config).map_err(NdError::from)
}

/// Load Kubernetes configuration
async fn load_config(context: Option<&str>) -> Result<Config> {
    if let Some(ctx) = context {
        let options = KubeConfigOptions {
            context: Some(ctx.to_string()),
            ..Default::default()
        };
        return Config::from_kubeconfig(&options)
            .await
            .map_err(|e| NdError::Config(format!("Failed to load kubeconfig: {e}")));
    }

    Config::infer()
        .await
        .map_err(|e| NdError::Config(format!("Failed to infer Kubernetes config: {e}")))
}
