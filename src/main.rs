use std::net::SocketAddr;

use picture_match::config::Config;
use picture_match::metrics::register_metrics;
use picture_match::startup::create_web_server;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    std_logger::Config::logfmt().init();
    register_metrics();

    let config = Config::get()?;
    let address: SocketAddr = format!("{}:{}", config.application.host, config.application.port).parse()?;
    let listener = TcpListener::bind(address).await?;

    create_web_server(config, listener).await?;
    Ok(())
}
