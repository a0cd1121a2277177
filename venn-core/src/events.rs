//! Filter-change notifications between diagrams and whoever schedules redraws.
//!
//! A diagram that changes the rows it lets through posts a [`Notification`]; the
//! [`RedrawScheduler`] collapses whatever is pending into one redraw list, so filter logic never
//! triggers rendering directly.

use std::{collections::BTreeSet, fmt::Display, sync::mpsc::{self, Receiver, Sender}};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Tsify, Serialize, Deserialize)]
pub struct DiagramId(pub u32);

impl Display for DiagramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "diagram-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification {
    pub source: DiagramId,
}

#[derive(Clone, Debug)]
pub struct Notifier {
    tx: Sender<Notification>,
}

impl Notifier {
    pub fn notify(&self, source: DiagramId) {
        debug!("{} changed its filter", source);
        if self.tx.send(Notification { source }).is_err() {
            warn!("redraw scheduler dropped; notification from {} lost", source);
        }
    }
}

#[derive(Debug)]
pub struct RedrawScheduler {
    rx: Receiver<Notification>,
    subscribers: BTreeSet<DiagramId>,
}

pub fn channel() -> (Notifier, RedrawScheduler) {
    let (tx, rx) = mpsc::channel();
    (Notifier { tx }, RedrawScheduler { rx, subscribers: BTreeSet::new() })
}

impl RedrawScheduler {
    pub fn subscribe(&mut self, id: DiagramId) {
        self.subscribers.insert(id);
    }

    pub fn unsubscribe(&mut self, id: DiagramId) {
        self.subscribers.remove(&id);
    }

    /// Consume pending notifications; every subscriber needs a redraw if there were any.
    pub fn drain(&mut self) -> Vec<DiagramId> {
        let sources: BTreeSet<DiagramId> = self.rx.try_iter().map(|n| n.source).collect();
        if sources.is_empty() {
            return vec![];
        }
        debug!("redraw after changes from {:?}", sources);
        self.subscribers.iter().copied().collect()
    }
}
