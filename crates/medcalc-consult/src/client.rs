use aws_sdk_bedrockruntime::Client;

/// Build a Bedrock runtime client for a region.
///
/// Credentials come from the default provider chain (environment, profile,
/// instance or Lambda role).
pub async fn build_client(region: &str) -> Client {
    let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()))
        .load()
        .await;
    Client::new(&config)
}
