//! `crawlmark forward`: send the stored corpus to the webhook.

use std::path::Path;

use crawlmark_client::{ForwardReport, WebhookClient, WebhookConfig, WebhookError};
use crawlmark_core::AppConfig;

use super::{EXIT_FAILURE, load_config};
use crate::cli::ForwardArgs;

pub async fn run(args: ForwardArgs) -> u8 {
    let Some(config) = load_config() else {
        return EXIT_FAILURE;
    };

    let dir = args.data_dir.unwrap_or_else(|| config.output_dir.clone());
    forward(&config, &dir).await
}

/// Forward every record in `dir` and map the result to an exit status.
///
/// 0 on success or when there is nothing to send, 2 on timeout, 3 when the
/// endpoint can't be reached and 1 for everything else.
pub async fn forward(config: &AppConfig, dir: &Path) -> u8 {
    match send(config, dir).await {
        Ok(ForwardReport::NoFiles) => 0,
        Ok(ForwardReport::Sent { metadata, status }) => {
            tracing::info!(
                "forwarded {} of {} files from '{}' (status {})",
                metadata.total_items,
                metadata.total_files,
                dir.display(),
                status
            );
            0
        }
        Err(e) => {
            report(&e);
            e.exit_code()
        }
    }
}

async fn send(config: &AppConfig, dir: &Path) -> Result<ForwardReport, WebhookError> {
    let client = WebhookClient::new(WebhookConfig::from_app_config(config)?)?;
    client.forward_dir(dir).await
}

fn report(err: &WebhookError) {
    match err {
        WebhookError::HttpStatus { status, body } => {
            tracing::error!("HTTP error: {status}");
            tracing::error!("response content: {body}");
        }
        WebhookError::Timeout(_) => tracing::error!("timeout error: {err}"),
        WebhookError::Connection(_) => {
            tracing::error!("connection error: could not connect to the webhook URL, check that the server is running")
        }
        _ => tracing::error!("{err}"),
    }
}
