use crate::commands::render_event_line;
use crate::state::messages::MonitorAction;
use log::{debug, info};
use tokio::sync::mpsc;

/// Stand-in for the chat layer: logs what would be posted and the presence
/// line that would be shown.
pub struct NotifierWorker {
    actions: mpsc::Receiver<MonitorAction>,
    presence: Option<String>,
}

impl NotifierWorker {
    pub fn new(actions: mpsc::Receiver<MonitorAction>) -> Self {
        Self { actions, presence: None }
    }

    pub async fn run(mut self) {
        while let Some(action) = self.actions.recv().await {
            if let MonitorAction::Announce { event_id, .. } = &action {
                debug!("announcing event {event_id}");
            }
            info!("{}", describe(&action));
            let presence = presence(&action, self.presence.take());
            match &presence {
                Some(p) => info!("presence: {p}"),
                None => info!("presence cleared"),
            }
            self.presence = presence;
        }
    }
}

pub fn describe(action: &MonitorAction) -> String {
    match action {
        MonitorAction::Announce { league, kind, presence, .. } => {
            format!("{league} {} is live: {presence}", kind.label())
        }
        MonitorAction::Clear => "Live event is over".to_owned(),
        MonitorAction::Upnext { events } => {
            let lines: Vec<String> = events.iter().map(render_event_line).collect();
            format!("Up next ({}):\n{}", events.len(), lines.join("\n"))
        }
    }
}

/// Presence after `action`; upnext leaves it as it was.
fn presence(action: &MonitorAction, current: Option<String>) -> Option<String> {
    match action {
        MonitorAction::Announce { presence, .. } => Some(presence.clone()),
        MonitorAction::Clear => None,
        MonitorAction::Upnext { .. } => current,
    }
}
