use crate::state::messages::{SchedulerCommand, SchedulerReply};
use crate::state::scheduler::SchedulerHandle;
use std::time::Duration;

/// One line typed on the watch console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Scheduler(SchedulerCommand),
    Running,
    Quit,
}

pub const CONTROL_HELP: &str =
    "commands: start | stop | cancel | running | status | interval <secs> | quit";

pub fn parse_control(line: &str) -> Result<Control, String> {
    let mut words = line.split_whitespace();
    let control = match (words.next(), words.next()) {
        (Some("start"), None) => Control::Scheduler(SchedulerCommand::Start),
        (Some("stop"), None) => Control::Scheduler(SchedulerCommand::Stop),
        (Some("cancel"), None) => Control::Scheduler(SchedulerCommand::Cancel),
        (Some("status"), None) => Control::Scheduler(SchedulerCommand::Status),
        (Some("running"), None) => Control::Running,
        (Some("quit" | "exit"), None) => Control::Quit,
        (Some("interval"), Some(secs)) => match secs.parse::<u64>() {
            Ok(secs) if secs > 0 => {
                Control::Scheduler(SchedulerCommand::SetInterval(Duration::from_secs(secs)))
            }
            _ => return Err(format!("interval needs a positive number of seconds, got {secs:?}")),
        },
        _ => return Err(format!("unknown command {:?}; {CONTROL_HELP}", line.trim())),
    };
    if words.next().is_some() {
        return Err(format!("unexpected arguments in {:?}", line.trim()));
    }
    Ok(control)
}

/// Run a control line against the scheduler and describe the outcome.
/// `None` for `Quit`.
pub async fn execute(control: Control, scheduler: &SchedulerHandle) -> Option<String> {
    let text = match control {
        Control::Quit => return None,
        Control::Running => match scheduler.status().await {
            Some(status) if status.running => "monitor is running".to_owned(),
            Some(_) => "monitor is stopped".to_owned(),
            None => SCHEDULER_GONE.to_owned(),
        },
        Control::Scheduler(command) => match scheduler.send(command).await {
            Some(reply) => render_reply(&reply),
            None => SCHEDULER_GONE.to_owned(),
        },
    };
    Some(text)
}

const SCHEDULER_GONE: &str = "monitor task has exited";

pub fn render_reply(reply: &SchedulerReply) -> String {
    match reply {
        SchedulerReply::Started => "monitor started".to_owned(),
        SchedulerReply::AlreadyRunning => "monitor is already running".to_owned(),
        SchedulerReply::Stopped => "monitor stopped".to_owned(),
        SchedulerReply::Cancelled => "monitor cancelled".to_owned(),
        SchedulerReply::NotRunning => "monitor is not running".to_owned(),
        SchedulerReply::IntervalChanged { from, to } => {
            format!("interval changed from {}s to {}s", from.as_secs(), to.as_secs())
        }
        SchedulerReply::InvalidInterval => "interval must be positive".to_owned(),
        SchedulerReply::Status(status) => {
            let last = status
                .last_tick
                .map(|t| t.format("%H:%M:%S UTC").to_string())
                .unwrap_or_else(|| "never".to_owned());
            format!(
                "running: {}, every {}s, {:?}, event: {}, ticks: {}, last: {last}",
                status.running,
                status.interval.as_secs(),
                status.phase,
                status.state.current_event_id.as_deref().unwrap_or("none"),
                status.ticks,
            )
        }
    }
}
