use anyhow::Context;
use jemallocator::Jemalloc;
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use riskscan::{
    feed::seed_tokens,
    utils::{format_compact, format_price, format_time_ago},
    CollectionViewState, MockTokenSource, Screen, Settings,
};

const TOP_ENTRIES: usize = 5;

#[tokio::main()]
async fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .context("Failed to initialize logger")?;

    let settings = Settings::new().context("Failed to load config.yaml. Please ensure it is valid")?;

    let seed = seed_tokens().context("Demo tokens failed validation")?;
    let view = CollectionViewState::with_settings(seed, &settings.view);
    let mut screen = Screen::new("live-scanner", view);

    report(&screen);

    if !settings.feed.enabled {
        info!("Live feed disabled in config, exiting");
        return Ok(());
    }

    screen.activate(
        MockTokenSource::from_settings(&settings.feed),
        settings.feed.poll_interval(),
    );

    run_scanner(&mut screen).await
}

async fn run_scanner(screen: &mut Screen) -> anyhow::Result<()> {
    #[cfg(unix)]
    let mut sigterm_stream = {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::terminate()).context("Failed to install SIGTERM handler")?
    };

    info!("Scanner running. Press Ctrl+C to stop.");

    loop {
        #[cfg(unix)]
        let batch = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
                break;
            },
            _ = sigterm_stream.recv() => {
                info!("Received SIGTERM, exiting gracefully...");
                break;
            },
            batch = screen.next_batch() => batch,
        };

        #[cfg(not(unix))]
        let batch = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal (Ctrl+C), exiting gracefully...");
                break;
            },
            batch = screen.next_batch() => batch,
        };

        match batch {
            Some(received) => {
                info!("Detected {} new token(s)", received);
                report(screen);
            },
            None => {
                info!("Live feed ended");
                break;
            },
        }
    }

    screen.shutdown().await;
    info!("Scanner stopped");
    Ok(())
}

fn report(screen: &Screen) {
    let view = screen.view();
    let stats = view.aggregate_stats();
    info!(
        "[{}] {} tokens | {} high risk | ${} volume | avg risk {}",
        screen.name(),
        stats.count,
        stats.high_risk_count,
        format_compact(stats.total_volume),
        stats.average_risk_score
    );

    let now = chrono::Utc::now();
    for token in view.derive().iter().take(TOP_ENTRIES) {
        let level = token.risk_level();
        info!(
            "  {:>3} {:<8} {:<20} {:<6} {:<9} liq ${:<7} price {} ({})",
            token.risk_score(),
            level.label(),
            token.name(),
            token.symbol(),
            token.chain(),
            format_compact(token.liquidity()),
            format_price(token.price()),
            format_time_ago(token.last_updated(), now)
        );
    }
}
