//! Job completion function.
//!
//! Triggered by the SNS topic Rekognition reports completed jobs to; turns
//! face search results into a report and label detection results into
//! alerts, then publishes them.

use anyhow::{anyhow, Context};
use aws_lambda_events::event::sns::SnsEvent;
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::{error, info};

use aident_lambda::clients::load_aws_config;
use aident_lambda::{
    handle_job_completion, init_tracing, CompletionConfig, CompletionServices, SUCCESS,
};
use aident_notify::{ChatBroadcaster, MessengerClient, SnsPublisher};
use aident_vision::RekognitionVision;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    init_tracing();

    let config = CompletionConfig::from_env().context("Failed to load completion configuration")?;
    info!("Completion config: {:?}", config);

    let aws_config = load_aws_config(config.region.as_deref()).await;
    let vision = RekognitionVision::new(&aws_config);
    let publisher = SnsPublisher::new(&aws_config);
    let messenger = config
        .messenger
        .clone()
        .map(MessengerClient::new)
        .transpose()
        .context("Failed to create Messenger client")?;

    let config = &config;
    let services = CompletionServices {
        vision: &vision,
        publisher: &publisher,
        chat: messenger.as_ref().map(|m| m as &dyn ChatBroadcaster),
    };

    run(service_fn(move |event: LambdaEvent<SnsEvent>| async move {
        match handle_job_completion(config, services, &event.payload).await {
            Ok(outcomes) => {
                info!(notifications = outcomes.len(), "Notifications handled");
                Ok(SUCCESS.to_string())
            }
            Err(e) => {
                error!("Failed to process job completion: {}", e);
                Err(lambda_runtime::Error::from(e))
            }
        }
    }))
    .await
    .map_err(|e| anyhow!(e))
}
