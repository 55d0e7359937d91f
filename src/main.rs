use log::{error, info};
use rs_vds::{environment, logger, CallOptions, VdsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logger::init_logging();
    environment::init();
    let env = environment::get();

    let mut client = VdsClient::new(&env.api_key, &env.api_secret)?;
    if let Some(endpoint) = &env.endpoint {
        client = client.endpoint(endpoint);
    }

    let options = CallOptions::default();

    let gateway = client.status(&options).await?;
    info!("gateway is {}", gateway.status);

    client.ensure_session().await?;
    info!("session established");

    match client.validate_session(&options).await? {
        true => info!("access token accepted by the gateway"),
        false => error!("access token rejected by the gateway"),
    }

    Ok(())
}
