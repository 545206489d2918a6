// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to wire up logging and configuration, then hand off to
// the `run_server` function from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let settings = configuration::load_settings()?;
    web_server::run_server(settings).await
}
