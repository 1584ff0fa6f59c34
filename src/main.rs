use bloglist::config::Config;
use bloglist::error::ApplicationError;
use bloglist::{api, logger};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    dotenv().ok();

    let config = Config::from_env()?;

    let _guard = logger::init(&config)?;

    api::serve(&config).await
}
