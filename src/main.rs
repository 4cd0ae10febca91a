mod api;
mod app;
mod booking;
mod catalog;
mod config;
mod error;
mod models;

use anyhow::Result;
use crate::api::{HttpRentalApi, InMemoryRentalApi, RentalApi};
use crate::app::{App, Command};
use crate::booking::SuccessSignal;
use crate::config::Settings;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 Rental Scout - browse and book rentals");

    let settings = Settings::new()?;
    debug!(?settings, "Loaded settings");

    let api: Arc<dyn RentalApi> = if settings.offline {
        info!("Offline mode, serving the demo catalog");
        Arc::new(InMemoryRentalApi::with_sample_catalog())
    } else {
        info!("Using rental service at {}", settings.base_url);
        Arc::new(HttpRentalApi::new(
            settings.base_url.clone(),
            settings.request_timeout(),
        )?)
    };

    let feedback = SuccessSignal::new(settings.success_banner());
    spawn_banner(&feedback);

    let mut app = App::new(api, settings.user_id, settings.page_size, feedback);
    app.load_catalog().await;
    if let Some(loaded_at) = app.catalog_loaded_at {
        info!("Catalog loaded at {}", loaded_at.format("%H:%M:%S"));
    }

    println!("{}", app.render_page());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !app.should_quit {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => println!("{}", app.handle(command).await),
            Err(message) => println!("{}", message),
        }
    }

    Ok(())
}

/// Print the success banner whenever it is raised
fn spawn_banner(feedback: &SuccessSignal) {
    let mut rx = feedback.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if *rx.borrow_and_update() {
                println!("✅ Booked successfully!");
            }
        }
    });
}
