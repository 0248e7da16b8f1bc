use crate::state::messages::{
    ControlRequest, MonitorAction, MonitorStatus, SchedulerCommand, SchedulerReply,
};
use crate::state::monitor::LiveMonitor;
use chrono::Utc;
use log::{debug, error, info, warn};
use lolesports_api::upstream::Upstream;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Owns the `LiveMonitor` and decides when it ticks. Ticks run inline in the
/// command loop, so they never overlap and a stop waits for the tick in
/// flight.
pub struct MonitorScheduler<U> {
    monitor: LiveMonitor<U>,
    commands: mpsc::Receiver<ControlRequest>,
    actions: mpsc::Sender<MonitorAction>,
    interval: Duration,
    running: bool,
    ticks: u64,
    last_tick: Option<chrono::DateTime<Utc>>,
}

impl<U: Upstream> MonitorScheduler<U> {
    /// The scheduler starts stopped; send `Start` through the handle.
    pub fn new(
        monitor: LiveMonitor<U>,
        interval: Duration,
        actions: mpsc::Sender<MonitorAction>,
    ) -> (Self, SchedulerHandle) {
        let (tx, commands) = mpsc::channel(16);
        let scheduler = Self {
            monitor,
            commands,
            actions,
            interval,
            running: false,
            ticks: 0,
            last_tick: None,
        };
        (scheduler, SchedulerHandle { commands: tx })
    }

    pub async fn run(mut self) {
        let mut ticker = ticker(Instant::now(), self.interval);
        loop {
            tokio::select! {
                request = self.commands.recv() => {
                    let Some(ControlRequest { command, reply }) = request else {
                        debug!("all scheduler handles dropped, exiting");
                        break;
                    };
                    let response = self.handle(command, &mut ticker);
                    let _ = reply.send(response);
                }
                _ = ticker.tick(), if self.running => {
                    self.run_tick().await;
                }
            }
        }
    }

    fn handle(&mut self, command: SchedulerCommand, ticker: &mut Interval) -> SchedulerReply {
        match command {
            SchedulerCommand::Start if self.running => SchedulerReply::AlreadyRunning,
            SchedulerCommand::Start => {
                info!("monitor started, polling every {:?}", self.interval);
                self.running = true;
                *ticker = self::ticker(Instant::now(), self.interval);
                SchedulerReply::Started
            }
            SchedulerCommand::Stop | SchedulerCommand::Cancel if !self.running => {
                SchedulerReply::NotRunning
            }
            SchedulerCommand::Stop => {
                info!("monitor stopped");
                self.running = false;
                SchedulerReply::Stopped
            }
            SchedulerCommand::Cancel => {
                info!("monitor cancelled");
                self.running = false;
                SchedulerReply::Cancelled
            }
            SchedulerCommand::SetInterval(to) if to.is_zero() => SchedulerReply::InvalidInterval,
            SchedulerCommand::SetInterval(to) => {
                let from = std::mem::replace(&mut self.interval, to);
                info!("monitor interval {from:?} -> {to:?}");
                *ticker = self::ticker(Instant::now() + to, to);
                SchedulerReply::IntervalChanged { from, to }
            }
            SchedulerCommand::Status => SchedulerReply::Status(self.status()),
        }
    }

    async fn run_tick(&mut self) {
        self.ticks += 1;
        self.last_tick = Some(Utc::now());
        match self.monitor.tick().await {
            Ok(actions) => {
                for action in actions {
                    if self.actions.send(action).await.is_err() {
                        warn!("notifier is gone, dropping monitor action");
                    }
                }
            }
            Err(e) => error!("monitor tick {} failed: {e}", self.ticks),
        }
    }

    fn status(&self) -> MonitorStatus {
        let state = self.monitor.state().clone();
        MonitorStatus {
            running: self.running,
            interval: self.interval,
            phase: state.phase(),
            state,
            ticks: self.ticks,
            last_tick: self.last_tick,
        }
    }
}

fn ticker(start: Instant, period: Duration) -> Interval {
    let mut ticker = interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Cloneable front for a running `MonitorScheduler`. Every call yields `None`
/// once the scheduler task has gone away.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    commands: mpsc::Sender<ControlRequest>,
}

impl SchedulerHandle {
    pub async fn send(&self, command: SchedulerCommand) -> Option<SchedulerReply> {
        let (reply, response) = oneshot::channel();
        self.commands.send(ControlRequest { command, reply }).await.ok()?;
        response.await.ok()
    }

    pub async fn start(&self) -> Option<SchedulerReply> {
        self.send(SchedulerCommand::Start).await
    }

    pub async fn status(&self) -> Option<MonitorStatus> {
        match self.send(SchedulerCommand::Status).await? {
            SchedulerReply::Status(status) => Some(status),
            _ => None,
        }
    }
}
