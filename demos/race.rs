//! Example: race the classical scan against scripted amplitude amplification.
//!
//! Usage: `cargo run --example race -- [9|16]`, with `RUST_LOG=debug` for
//! process-level detail.

use log::info;
use qsearch::{BitLength, Lane, SimulationConfig, SimulationController};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let bits = std::env::args().nth(1).map(|arg| arg.parse::<u32>()).transpose()?.unwrap_or(9);
    let bit_length = BitLength::try_from(bits)?;
    let controller = SimulationController::new(SimulationConfig::new().with_bit_length(bit_length))?;

    let snapshot = controller.snapshot();
    println!("--- Find the cat: {} ---", bit_length);
    println!("Target {} hides in room {}", snapshot.target, snapshot.target_index);
    for row in snapshot.room_address(Lane::Classical).rows() {
        println!("  {}", row);
    }

    let mut updates = controller.subscribe();
    let watcher = controller.clone();
    let progress = tokio::spawn(async move {
        if updates.changed().await.is_err() {
            return;
        }
        let mut ticker = tokio::time::interval(Duration::from_millis(500));
        loop {
            ticker.tick().await;
            let snapshot = watcher.snapshot();
            info!(
                "classical {} / {} | quantum {} / {} | faulty qubits {}",
                snapshot.classical.checks_count,
                snapshot.room_count,
                snapshot.quantum.checks_count,
                snapshot.quantum_iterations,
                snapshot.qubits.iter().filter(|&&fault| fault).count()
            );
            if !snapshot.running {
                break;
            }
        }
    });

    let outcome = controller.start().await?;
    progress.await?;

    match outcome.into_report() {
        Ok(report) => println!("\n{}", report),
        Err(err) => println!("\nNo result: {}", err),
    }
    Ok(())
}
