use alloc::vec::Vec;
use core::fmt;

use spin::Mutex;

/// Initialization status of one component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    NotStarted,
    InProgress,
    Completed,
    Failed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ComponentStatus {
    pub name: &'static str,
    pub status: InitStatus,
}

static INIT_STATUS: Mutex<Vec<ComponentStatus>> = Mutex::new(Vec::new());

impl ComponentStatus {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            status: InitStatus::NotStarted,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.status, InitStatus::Completed)
    }
}

/// Track a component; registering the same name twice is a no-op.
pub fn register_component(name: &'static str) {
    let mut components = INIT_STATUS.lock();
    if !components.iter().any(|c| c.name == name) {
        components.push(ComponentStatus::new(name));
    }
}

pub fn update_component_status(name: &'static str, status: InitStatus) {
    let mut components = INIT_STATUS.lock();
    if let Some(comp) = components.iter_mut().find(|c| c.name == name) {
        comp.status = status;
    }
}

pub fn component_status(name: &str) -> Option<InitStatus> {
    INIT_STATUS
        .lock()
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.status)
}

pub fn get_all_statuses() -> Vec<ComponentStatus> {
    INIT_STATUS.lock().iter().copied().collect()
}

/// True once every component in `names` has completed.
pub fn components_ready(names: &[&str]) -> bool {
    let components = INIT_STATUS.lock();
    names.iter().all(|name| {
        components
            .iter()
            .any(|c| c.name == *name && c.is_complete())
    })
}

impl fmt::Display for InitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitStatus::NotStarted => write!(f, "Not Started"),
            InitStatus::InProgress => write!(f, "In Progress"),
            InitStatus::Completed => write!(f, "Completed"),
            InitStatus::Failed(err) => write!(f, "Failed: {}", err),
        }
    }
}
