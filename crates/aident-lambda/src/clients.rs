//! AWS SDK configuration shared by the service clients.

use aws_config::BehaviorVersion;
use aws_types::region::Region;
use aws_types::SdkConfig;
use tracing::debug;

/// Load the SDK configuration, pinning the region when one is configured.
pub async fn load_aws_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }

    let config = loader.load().await;
    debug!(region = ?config.region(), "Loaded AWS configuration");
    config
}
