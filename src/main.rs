use std::{collections::HashMap, env, process};

use token_launcher::launch::{self, AxumServer, LaunchError, ServeOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), axum::BoxError> {
    dotenvy::dotenv().ok();

    let opts = ServeOptions::default();
    init_tracing(&opts);

    let snapshot: HashMap<String, String> = env::vars().collect();
    match launch::run(&snapshot, token_launcher::app(), &AxumServer, opts).await {
        Ok(()) => Ok(()),
        Err(LaunchError::Config(err)) => {
            println!("❌ {err}");
            println!("Please set these in your .env file or environment");
            process::exit(1);
        }
        Err(LaunchError::Server(err)) => Err(err),
    }
}

fn init_tracing(opts: &ServeOptions) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts.log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
