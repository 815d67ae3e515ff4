use std::{future::Future, pin::Pin, time::Duration};

use anyhow::Result;
use tokio::{sync::mpsc, time::MissedTickBehavior};
use tracing::{error, info};

use crate::{
    app::poll_cycle::{poll_cycle, PollOutcome},
    config::Config,
    ports::{ApiClientPort, ClockPort, NotifierPort, NotifyStorePort, RuleStorePort},
};

mod poll_state;

use poll_state::PollExecutionState;

type PollFuture<'a> = Pin<Box<dyn Future<Output = Result<PollOutcome>> + 'a>>;

/// Drives the recurring poll schedule until interrupted.
///
/// At most one cycle runs at a time. The interval timer and the manual poke
/// (SIGHUP on unix) both go through [`PollExecutionState`], so a trigger
/// landing mid-cycle queues a single immediate follow-up instead of
/// overlapping. After each cycle the timer is re-armed at `now + interval`,
/// replacing any pending tick.
pub async fn run_watch<C, R, S, N, K>(
    cfg: &Config,
    api: &C,
    rules: &R,
    store: &S,
    notifier: &N,
    clock: &K,
) -> Result<()>
where
    C: ApiClientPort,
    R: RuleStorePort,
    S: NotifyStorePort,
    N: NotifierPort,
    K: ClockPort,
{
    let (poke_tx, mut poke_rx) = mpsc::channel::<()>(1);
    // A local sender stays in scope so `recv` pends instead of closing when
    // the listener task exits (non-unix builds, or signal setup failure).
    spawn_manual_poke_listener(poke_tx.clone());

    let mut interval =
        tokio::time::interval(Duration::from_secs(cfg.interval_minutes * 60));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick of a tokio interval fires immediately, which doubles as
    // the startup poll.

    let mut poll_state = PollExecutionState::default();
    let mut in_flight_poll: Option<PollFuture<'_>> = None;

    loop {
        if poll_state.start_poll() {
            in_flight_poll = Some(Box::pin(poll_cycle(cfg, api, rules, store, notifier, clock)));
        }

        tokio::select! {
            _ = interval.tick() => {
                poll_state.request_poll();
            }
            _ = poke_rx.recv() => {
                info!("manual refresh requested");
                poll_state.request_poll();
            }
            result = async {
                match in_flight_poll.as_mut() {
                    Some(fut) => Some(fut.await),
                    None => None,
                }
            }, if in_flight_poll.is_some() => {
                let result = result.expect("poll future must exist when branch is active");
                in_flight_poll = None;

                match result {
                    Ok(outcome) if outcome.fetch_failures.is_empty() => {}
                    Ok(outcome) => {
                        for failure in &outcome.fetch_failures {
                            error!(repo = %failure.repo, "fetch failed: {}", failure.message);
                        }
                    }
                    // State-store failure: the cycle is lost, the schedule
                    // is not.
                    Err(err) => error!(error = ?err, "poll cycle failed"),
                }

                if poll_state.finish_poll() {
                    info!("running queued refresh");
                }
                interval.reset();
            }
            _ = tokio::signal::ctrl_c() => {
                if poll_state.in_flight() {
                    info!("shutting down; in-flight poll abandoned");
                } else {
                    info!("shutting down");
                }
                break;
            }
        }
    }

    Ok(())
}

#[cfg(unix)]
fn spawn_manual_poke_listener(tx: mpsc::Sender<()>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let Ok(mut hangup) = signal(SignalKind::hangup()) else {
            return;
        };
        while hangup.recv().await.is_some() {
            let _ = tx.try_send(());
        }
    });
}

#[cfg(not(unix))]
fn spawn_manual_poke_listener(_tx: mpsc::Sender<()>) {}
