//! Detection starter function.
//!
//! Triggered by S3 uploads; starts Rekognition label detection and face
//! search for every uploaded video.

use anyhow::{anyhow, Context};
use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing::{error, info};

use aident_lambda::clients::load_aws_config;
use aident_lambda::{handle_upload, init_tracing, StarterConfig, SUCCESS};
use aident_vision::RekognitionVision;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider (required for TLS/HTTPS)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow!("Failed to install rustls crypto provider"))?;

    dotenvy::dotenv().ok();
    init_tracing();

    let config = StarterConfig::from_env().context("Failed to load starter configuration")?;
    info!("Starter config: {:?}", config);

    let aws_config = load_aws_config(config.region.as_deref()).await;
    let vision = RekognitionVision::new(&aws_config);

    let config = &config;
    let vision = &vision;

    run(service_fn(move |event: LambdaEvent<S3Event>| async move {
        match handle_upload(config, vision, &event.payload).await {
            Ok(started) => {
                info!(videos = started.len(), "Upload handled");
                Ok(SUCCESS.to_string())
            }
            Err(e) => {
                error!("Failed to start detection: {}", e);
                Err(lambda_runtime::Error::from(e))
            }
        }
    }))
    .await
    .map_err(|e| anyhow!(e))
}
