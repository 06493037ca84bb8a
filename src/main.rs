/*
 *  main.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::time::Duration;

use env_logger::Env;
use log::{debug, error, info};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

mod config;
mod display;
mod fetch;
mod icons;
mod payload;
mod render;
mod timekeeper;
mod transport;
mod weathercode;

use display::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};
use display::{DisplayDriver, MockDriver, Panel};
use fetch::FetchScheduler;
use render::RenderScheduler;
use timekeeper::{SystemTimeSource, TimeSource};
use transport::LogPublisher;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Wait for SIGINT, SIGTERM, or SIGHUP, then return so the main loop
/// can shut down cleanly.
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(
        Env::default().default_filter_or(cfg.log_level.as_deref().unwrap_or("info")),
    )
    .init();

    info!(
        "{} {} (built {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE
    );

    let mut driver = MockDriver::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    driver.init()?;

    let clock = SystemTimeSource::new();
    let publisher = LogPublisher;
    let mut fetcher = FetchScheduler::new();
    let mut scheduler = RenderScheduler::new(Panel::new(driver), cfg.location_label());

    scheduler.initial_layout(&clock)?;

    // the wire is quiet until asked; prime it once at startup
    fetcher.request_now(&publisher);

    let (tx, mut rx) = transport::payload_queue();
    if cfg.demo == Some(true) {
        transport::spawn_demo_feeder(tx.clone());
    }

    let shutdown = signal_handler();
    tokio::pin!(shutdown);

    let mut ticker = tokio::time::interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            res = &mut shutdown => {
                res?;
                break;
            }
            _ = ticker.tick() => {
                let mut dirty = false;

                // drain pending payloads before the time diff so a
                // tick observes at most one consistent frame
                while let Ok(msg) = rx.try_recv() {
                    debug!("payload on {:?}", msg.channel);
                    scheduler.apply(&msg)?;
                    dirty = true;
                }

                let snap = clock.snapshot();
                fetcher.on_tick(&snap, &publisher);

                let events = scheduler.on_tick(&clock)?;
                if events.day_changed || events.time_changed {
                    dirty = true;
                }

                // the loop never halts on panel trouble; a failed
                // flush just leaves the previous frame up
                if dirty {
                    if let Err(e) = scheduler.panel_mut().target_mut().flush() {
                        error!("flush failed: {e}");
                    }
                    if let Some(path) = cfg.frame_dump.as_deref() {
                        if let Err(e) = scheduler.panel().target().dump_ppm(path) {
                            error!("frame dump failed: {e}");
                        }
                    }
                }
            }
        }
    }

    info!("shutting down");
    scheduler.panel_mut().target_mut().clear()?;
    Ok(())
}
