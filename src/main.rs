mod config;
mod dataset;
mod error;
mod load;
mod storage;

use chrono::Local;
use config::LoaderConfig;
use dataset::{Dataset, DirectorySource};
use log::{error, info};
use std::io::Write;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(log::LevelFilter::Warn)
        .filter_module("yelp_loader", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    // .env 可选，缺省使用约定的文件名和路径
    dotenv::dotenv().ok();
    let config = LoaderConfig::from_env();
    info!(
        "Loading datasets from {} into {} (batch size {})",
        config.data_dir.display(),
        config.database_url,
        config.batch_size
    );

    let db = match storage::establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("cannot connect to {}: {}", config.database_url, e);
            return Err(e.into());
        }
    };

    let source = DirectorySource::new(&config.data_dir);
    for dataset in Dataset::ALL {
        info!("  {}: {}", dataset, source.path_of(dataset).display());
    }
    match load::run(&db, &source, config.batch_size).await {
        Ok(summary) => {
            info!("Done! {}", summary);
            Ok(())
        }
        Err(e) => {
            error!("load aborted, nothing was committed: {}", e);
            Err(e.into())
        }
    }
}
