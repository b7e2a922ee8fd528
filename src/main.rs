use docker_image_builder::error::handlers::HttpErrorHandler;
use docker_image_builder::{Args, BuildConfig, Logger, Result, Runner};

async fn run(args: Args) -> Result<()> {
    let config = BuildConfig::from_args(args)?;
    let runner = Runner::new(config)?;
    runner.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    let logger = Logger::new(args.debug);

    if let Err(e) = run(args).await {
        logger.error(&e.to_string());
        if HttpErrorHandler::is_credentials_problem(&e) {
            logger.warning("Check the DOCKER_LOGIN and DOCKER_PASSWORD settings");
        }
        std::process::exit(1);
    }
}
