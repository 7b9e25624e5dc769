//! Dashboard instances owned by the JS-facing handles
//! Thread-local storage keyed by instance id instead of global mutable state

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

use shift_board_data::{Dashboard, FetchTransport};

pub type BrowserDashboard = Dashboard<FetchTransport>;

thread_local! {
    static DASHBOARDS: RefCell<HashMap<Uuid, Rc<BrowserDashboard>>> = RefCell::new(HashMap::new());
}

pub struct InstanceManager;

impl InstanceManager {
    /// Register a dashboard and return its id
    pub fn create_instance(dashboard: BrowserDashboard) -> Uuid {
        let id = Uuid::new_v4();
        DASHBOARDS.with(|instances| {
            instances.borrow_mut().insert(id, Rc::new(dashboard));
        });
        id
    }

    /// Shared handle for async work. The map is not borrowed while the
    /// caller awaits, so concurrent actions on one instance are fine.
    pub fn get(id: &Uuid) -> Option<Rc<BrowserDashboard>> {
        DASHBOARDS.with(|instances| instances.borrow().get(id).cloned())
    }

    pub fn instance_exists(id: &Uuid) -> bool {
        DASHBOARDS.with(|instances| instances.borrow().contains_key(id))
    }

    pub fn remove_instance(id: &Uuid) -> Option<Rc<BrowserDashboard>> {
        DASHBOARDS.with(|instances| instances.borrow_mut().remove(id))
    }

    pub fn instance_count() -> usize {
        DASHBOARDS.with(|instances| instances.borrow().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shift_board_config::ShiftBoardConfig;

    #[test]
    fn test_instance_lifecycle() {
        let config = ShiftBoardConfig::new(
            "https://sheets.example.org/roster.csv",
            "https://script.example.org/exec",
        );
        let dashboard = Dashboard::new(FetchTransport::new(), &config).unwrap();

        let id = InstanceManager::create_instance(dashboard);
        assert!(InstanceManager::instance_exists(&id));
        assert_eq!(InstanceManager::instance_count(), 1);
        assert!(InstanceManager::get(&id).is_some());

        InstanceManager::remove_instance(&id);
        assert!(!InstanceManager::instance_exists(&id));
        assert!(InstanceManager::get(&id).is_none());
    }
}
