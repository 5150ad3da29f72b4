use std::time::Duration;

use cellref_janitor::config::Config;
use cellref_janitor::http::{app, listen, setup_metrics_recorder};
use cellref_janitor::janitor::Janitor;
use envconfig::Envconfig;
use eyre::Result;
use tracing::{error, info};

async fn cleanup_loop(janitor: Janitor, interval_secs: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        interval.tick().await;

        // Whether a run can be retried is the scheduler's call, not ours; a
        // failed run is logged and the next tick simply tries again.
        if let Err(e) = janitor.run_once().await {
            error!("janitor failed cleanup with: {}", e);
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::init_from_env().expect("failed to load configuration from env");

    let janitor_config = config.get_janitor_config();

    info!(
        "starting janitor {} on staging table {}",
        janitor_config.settings.id, janitor_config.settings.table_name
    );

    let janitor = Janitor::new(janitor_config)
        .await
        .expect("failed to create janitor");

    let janitor_loop = tokio::spawn(cleanup_loop(janitor, config.cleanup_interval_secs));

    let recorder_handle = setup_metrics_recorder();
    let http_server = tokio::spawn(listen(app(Some(recorder_handle)), config.bind()));

    tokio::select! {
        res = janitor_loop => {
            error!("janitor loop exited");
            if let Err(e) = res {
                error!("janitor failed with: {}", e)
            }
        }
        res = http_server => {
            error!("http server exited");
            if let Err(e) = res {
                error!("server failed with: {}", e)
            }
        }
    }

    info!("exiting");
}
