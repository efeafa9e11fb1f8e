mod config;

use std::{env, path::PathBuf};

use anyhow::Context;
use log::{info, warn};
use machine_learning::{config::TrainingConfig, training};
use tokio::{signal, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            info!("loading config from {}", path.display());
            config::load(&path)?
        }
        None => TrainingConfig::default(),
    };

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    let mut run = task::spawn_blocking(move || {
        training::train_synthetic(&config, token, |stats| println!("{stats}"))
    });

    let run = tokio::select! {
        ret = &mut run => ret,
        _ = signal::ctrl_c() => {
            warn!("received SIGINT, stopping at the next minibatch");
            cancel.cancel();
            run.await
        }
    };

    let run = run.context("training task panicked")??;
    println!("{}", run.error);

    Ok(())
}
