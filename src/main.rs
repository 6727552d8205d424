/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use env_logger::Builder;
use log::{LevelFilter, error, info, warn};
use rctelem::{Recorder, SessionConfig, get_telemetry_port_connection, wait_for_port};
use std::io::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = SessionConfig::default();

    let port_info = match wait_for_port(&config).await {
        Ok(port) => port,
        Err(e) => {
            error!("{}", e);
            return Err(e);
        }
    };
    let mut connection = get_telemetry_port_connection(port_info, &config).await?;
    let (mut recorder, path) = Recorder::create(&config)?;
    info!("Recording to {}, press Ctrl-C to stop", path.display());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                if let Err(e) = signal {
                    warn!("Failed to listen for Ctrl-C: {}", e);
                }
                break Ok(());
            }
            record = connection.read_record() => {
                let record = match record {
                    Ok(Some(record)) => record,
                    Ok(None) => continue,
                    Err(e) => break Err(e),
                };
                match recorder.handle_record(&record) {
                    Ok(outcome) => {
                        let sample = recorder.sample();
                        info!(
                            "speed {:.2} top {:.2} alt {:.2} max {:.2} at {:.6},{:.6}{}",
                            sample.speed,
                            sample.top_speed,
                            sample.altitude,
                            sample.max_altitude,
                            sample.latitude,
                            sample.longitude,
                            if outcome.fix_written { " (fix written)" } else { "" }
                        );
                    }
                    Err(e) => break Err(e),
                }
            }
        }
    };

    // Shut down the same way on Ctrl-C and on a lost link
    let fixes = recorder.fixes_written();
    recorder.finish()?;
    info!("Saved {} fixes to {}", fixes, path.display());
    connection.close().await?;

    if let Err(e) = &result {
        error!("Stopped recording: {}", e);
    }
    result
}
