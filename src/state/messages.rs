use crate::state::monitor::{MonitorPhase, MonitorState};
use chrono::{DateTime, Utc};
use lolesports_api::{Event, EventKind};
use std::time::Duration;
use tokio::sync::oneshot;

/// What the monitor asks the notifier to do. The notifier owns the final
/// wording.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorAction {
    Announce {
        event_id: String,
        kind: EventKind,
        league: String,
        presence: String,
    },
    Clear,
    Upnext { events: Vec<Event> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerCommand {
    Start,
    Stop,
    Cancel,
    SetInterval(Duration),
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerReply {
    Started,
    AlreadyRunning,
    Stopped,
    Cancelled,
    NotRunning,
    IntervalChanged { from: Duration, to: Duration },
    InvalidInterval,
    Status(MonitorStatus),
}

/// Read-only snapshot of the scheduler and the monitor it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorStatus {
    pub running: bool,
    pub interval: Duration,
    pub phase: MonitorPhase,
    pub state: MonitorState,
    pub ticks: u64,
    pub last_tick: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct ControlRequest {
    pub command: SchedulerCommand,
    pub reply: oneshot::Sender<SchedulerReply>,
}
