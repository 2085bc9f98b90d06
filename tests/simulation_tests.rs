// tests/simulation_tests.rs

use qsearch::{
    BitLength, CellState, Lane, RunOutcome, SearchError, SimulationConfig, SimulationController, Timing,
};
use std::time::Duration;
use tokio::time::Instant;

// Helper to build a seeded controller with default pacing
fn controller(bit_length: BitLength, seed: u64) -> SimulationController {
    let config = SimulationConfig::new().with_bit_length(bit_length).with_seed(seed);
    SimulationController::new(config).expect("controller")
}

#[tokio::test(start_paused = true)]
async fn test_nine_bit_race_completes() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 9);
    let target_index = ctl.snapshot().target_index as u64;

    let report = ctl.start().await?.into_report()?;
    assert_eq!(report.classical_checks, target_index + 1);
    assert_eq!(report.quantum_checks, 23);
    assert_eq!(report.speedup(), Some(((target_index + 1) as f64 / 23.0).round() as u64));

    let snapshot = ctl.snapshot();
    assert!(!snapshot.running);
    assert!(snapshot.completed);
    assert_eq!(snapshot.report(), Some(report));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_final_room_states() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 10);
    ctl.start().await?;
    let snapshot = ctl.snapshot();
    let target_index = snapshot.target_index;

    for lane in [Lane::Classical, Lane::Quantum] {
        let states = snapshot.states(lane);
        assert_eq!(states[target_index], CellState::Found, "{} target room", lane);
        assert_eq!(
            states.iter().filter(|&&state| state == CellState::Unchecked).count(),
            states.len() - 1,
            "{} lane should only keep the target highlighted",
            lane
        );
    }
    assert_eq!(snapshot.classical.current_index, Some(target_index));
    assert_eq!(snapshot.classical.current_value, snapshot.target);
    assert_eq!(snapshot.quantum.current_index, None);
    assert_eq!(snapshot.quantum.current_value, snapshot.target);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_sixteen_bit_scaling() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Sixteen, 16);
    let target_index = ctl.snapshot().target_index as u64;

    let report = ctl.start().await?.into_report()?;
    assert_eq!(report.classical_checks, target_index + 1);
    assert_eq!(report.quantum_checks, 257);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_processes_run_concurrently() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 21);
    let timing = Timing::for_bit_length(BitLength::Nine);
    let rounds = BitLength::Nine.quantum_iterations() as u32;
    let classical_time = timing.classical_delay * (ctl.snapshot().target_index as u32 + 1);
    let quantum_time = timing.settle_delay + timing.quantum_iteration_delay * (2 * rounds - 1);

    let started = Instant::now();
    ctl.start().await?.into_report()?;
    let elapsed = started.elapsed();

    let longest = classical_time.max(quantum_time);
    assert!(elapsed >= longest, "elapsed {:?} shorter than {:?}", elapsed, longest);
    assert!(
        elapsed < longest + Duration::from_millis(100),
        "elapsed {:?} suggests sequential execution (classical {:?}, quantum {:?})",
        elapsed,
        classical_time,
        quantum_time
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_completion_suppresses_report() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 3);
    let runner = ctl.clone();
    let handle = tokio::spawn(async move { runner.start().await });

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(ctl.is_running());
    ctl.stop();
    assert!(!ctl.is_running(), "running must drop before the processes unwind");

    let outcome = handle.await.expect("join")?;
    assert_eq!(outcome, RunOutcome::Cancelled);
    assert_eq!(outcome.into_report(), Err(SearchError::CancelledRun));

    let snapshot = ctl.snapshot();
    assert!(!snapshot.running);
    assert!(!snapshot.completed);
    assert!(snapshot.cancelled);
    assert_eq!(snapshot.report(), None);
    assert!(snapshot.quantum.checks_count <= 1, "quantum lane was still settling");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_stop() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 4);
    let runner = ctl.clone();
    let first = tokio::spawn(async move { runner.start().await });
    tokio::time::sleep(Duration::from_millis(75)).await;
    ctl.stop();

    // Restart before the first run has unwound its current delay.
    let target_index = ctl.snapshot().target_index as u64;
    let report = ctl.start().await?.into_report()?;
    assert_eq!(first.await.expect("join")?, RunOutcome::Cancelled);
    assert_eq!(report.classical_checks, target_index + 1);
    assert_eq!(report.quantum_checks, 23);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_mid_amplification_freezes_both_lanes() -> Result<(), SearchError> {
    // Pick a layout where the classical scan is still going when we stop.
    let ctl = (0..)
        .map(|seed| controller(BitLength::Nine, seed))
        .find(|ctl| ctl.snapshot().target_index > 60)
        .expect("some seed puts the target past room 60");
    let target_index = ctl.snapshot().target_index;
    let runner = ctl.clone();
    let handle = tokio::spawn(async move { runner.start().await });

    // Settle is over at 1000 ms; each round takes 100 ms.
    tokio::time::sleep(Duration::from_millis(1520)).await;
    ctl.stop();
    let stopped = ctl.snapshot();

    assert_eq!(handle.await.expect("join")?, RunOutcome::Cancelled);
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(ctl.snapshot(), stopped, "no updates land after stop");

    let rounds = stopped.quantum.checks_count;
    assert!(rounds > 1 && rounds < 23, "quantum stopped mid-run, got {}", rounds);
    assert!(!stopped.quantum_states.contains(&CellState::Found));
    assert_eq!(stopped.quantum_states[target_index], CellState::Amplified);

    let current = stopped.classical.current_index.expect("classical lane was scanning");
    assert!(current < target_index);
    assert_eq!(stopped.classical_states[current], CellState::Checking);
    assert_eq!(
        stopped.classical_states.iter().filter(|&&state| state == CellState::Checking).count(),
        1
    );
    assert!(!stopped.classical_states.contains(&CellState::Found));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dropped_start_releases_the_controller() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 8);
    let abandoned = tokio::time::timeout(Duration::from_millis(100), ctl.start()).await;
    assert!(abandoned.is_err(), "a 9-bit race cannot finish in 100 ms");

    let snapshot = ctl.snapshot();
    assert!(!snapshot.running);
    assert!(snapshot.cancelled);
    assert!(!snapshot.completed);
    assert!(snapshot.classical.checks_count > 0);

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(ctl.snapshot(), snapshot);

    ctl.change_bit_length(16)?;
    assert_eq!(ctl.bit_length(), BitLength::Sixteen);
    let target_index = ctl.snapshot().target_index as u64;
    let report = ctl.start().await?.into_report()?;
    assert_eq!(report.classical_checks, target_index + 1);
    assert_eq!(report.quantum_checks, 257);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_change_bit_length_while_running_is_noop() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 5);
    let runner = ctl.clone();
    let handle = tokio::spawn(async move { runner.start().await });
    tokio::time::sleep(Duration::from_millis(200)).await;

    let before = ctl.snapshot();
    ctl.change_bit_length(16)?;
    let after = ctl.snapshot();
    assert_eq!(before, after);
    assert_eq!(ctl.bit_length(), BitLength::Nine);

    ctl.stop();
    handle.await.expect("join")?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_change_bit_length_resets_when_idle() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 6);
    ctl.change_bit_length(9)?;
    assert_eq!(ctl.snapshot().room_count, 512);

    ctl.change_bit_length(16)?;
    let snapshot = ctl.snapshot();
    assert_eq!(snapshot.bit_length, BitLength::Sixteen);
    assert_eq!(snapshot.room_count, 65536);
    assert_eq!(snapshot.quantum_iterations, 256);
    assert_eq!(snapshot.classical_states.len(), 65536);
    qsearch::validate_address_space(snapshot.address_space())?;

    assert_eq!(
        ctl.change_bit_length(10),
        Err(SearchError::InvalidConfiguration { bit_length: 10 })
    );
    assert_eq!(ctl.bit_length(), BitLength::Sixteen);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_reset_clears_everything() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 7);
    ctl.start().await?;
    let finished = ctl.snapshot();
    assert!(finished.completed);

    ctl.reset()?;
    let fresh = ctl.snapshot();
    assert!(!fresh.completed);
    assert!(!fresh.running);
    assert_eq!(fresh.classical.checks_count, 0);
    assert_eq!(fresh.quantum.checks_count, 0);
    assert_eq!(fresh.classical.current_index, None);
    assert!(fresh.classical_states.iter().all(|&state| state == CellState::Unchecked));
    assert!(fresh.quantum_states.iter().all(|&state| state == CellState::Unchecked));
    assert!(fresh.qubits.iter().all(|&fault| !fault));
    assert_ne!(fresh.address_space().permutation(), finished.address_space().permutation());
    assert_eq!(fresh.report(), None);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_changes() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 8);
    let mut revisions = ctl.subscribe();
    assert!(!revisions.has_changed().expect("sender alive"));

    ctl.start().await?;
    assert!(revisions.has_changed().expect("sender alive"));
    // At least one update per classical check, more for the quantum lane.
    let seen = *revisions.borrow_and_update();
    assert!(seen > ctl.snapshot().classical.checks_count);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_idle_snapshot_displays_target() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 12);
    let snapshot = ctl.snapshot();
    assert!(snapshot.classical.is_idle());
    assert_eq!(snapshot.displayed_value(Lane::Classical), snapshot.target);
    assert_eq!(snapshot.room_address(Lane::Quantum).value(), snapshot.target);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_serializes_for_renderers() -> Result<(), SearchError> {
    let ctl = controller(BitLength::Nine, 13);
    ctl.start().await?;
    let json = serde_json::to_value(ctl.snapshot()).expect("serializable");

    assert_eq!(json["bit_length"], 9);
    assert_eq!(json["quantum"]["checks_count"], 23);
    assert_eq!(json["completed"], true);
    assert_eq!(json["classical_states"].as_array().map(Vec::len), Some(512));
    assert!(json["quantum_states"].as_array().is_some_and(|states| states.contains(&"found".into())));
    assert!(json.get("address_space").is_none());
    Ok(())
}

#[tokio::test]
async fn test_instant_timing_race() -> Result<(), SearchError> {
    let config = SimulationConfig::new()
        .with_bit_length(BitLength::Sixteen)
        .with_timing(Timing::instant())
        .with_seed(14);
    let ctl = SimulationController::new(config)?;
    let report = ctl.start().await?.into_report()?;
    assert_eq!(report.quantum_checks, 257);
    assert_eq!(report.classical_checks, ctl.snapshot().target_index as u64 + 1);
    Ok(())
}
