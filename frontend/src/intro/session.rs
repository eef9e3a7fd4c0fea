use std::cell::RefCell;
use std::collections::HashMap;

use crate::intro::IntroError;

/// Minimal key/value view of a session-scoped store.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// Reads the visitation flag and, when it is missing, sets it before
/// returning. Returns `true` only for the first caller in a session.
pub fn claim_first_visit<S: SessionStore + ?Sized>(store: &mut S, key: &str) -> bool {
    if store.get(key).is_some() {
        return false;
    }
    store.set(key, "true");
    true
}

#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

thread_local! {
    static PAGE_SESSION: RefCell<MemorySession> = RefCell::new(MemorySession::default());
}

/// Raw key/value area underneath [`BrowserSession`]. Both calls may throw in
/// the browser (private modes, quota, sandboxed iframes).
pub trait StorageArea {
    fn read(&self, key: &str) -> Result<Option<String>, IntroError>;
    fn write(&self, key: &str, value: &str) -> Result<(), IntroError>;
}

impl StorageArea for web_sys::Storage {
    fn read(&self, key: &str) -> Result<Option<String>, IntroError> {
        self.get_item(key)
            .map_err(|e| IntroError::dom("sessionStorage.getItem", e))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), IntroError> {
        self.set_item(key, value)
            .map_err(|e| IntroError::dom("sessionStorage.setItem", e))
    }
}

/// `window.sessionStorage` mirrored into a page-lifetime map. Every write
/// lands in the map and reads consult it whenever storage has nothing, so a
/// flag survives remounts within the page even when `setItem` or `getItem`
/// throws.
pub struct BrowserSession<A = web_sys::Storage> {
    storage: Option<A>,
}

impl BrowserSession {
    pub fn open() -> Self {
        match Self::session_storage() {
            Ok(storage) => Self::with_storage(storage),
            Err(e) => {
                log::warn!("Session storage unavailable, intro state is page-scoped: {}", e);
                Self::page_only()
            }
        }
    }

    fn session_storage() -> Result<web_sys::Storage, IntroError> {
        let window = web_sys::window().ok_or(IntroError::NoWindow)?;
        window
            .session_storage()
            .map_err(|e| IntroError::dom("sessionStorage", e))?
            .ok_or(IntroError::StorageUnavailable)
    }
}

impl<A: StorageArea> BrowserSession<A> {
    pub fn with_storage(storage: A) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub fn page_only() -> Self {
        Self { storage: None }
    }

    pub fn is_page_only(&self) -> bool {
        self.storage.is_none()
    }
}

impl<A: StorageArea> SessionStore for BrowserSession<A> {
    fn get(&self, key: &str) -> Option<String> {
        if let Some(storage) = &self.storage {
            match storage.read(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(e) => log::debug!("Reading {} from session storage failed: {}", key, e),
            }
        }
        PAGE_SESSION.with(|s| s.borrow().get(key))
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if let Err(e) = storage.write(key, value) {
                log::warn!("Failed to persist {} in session storage: {}", key, e);
                self.storage = None;
            }
        }
        PAGE_SESSION.with(|s| s.borrow_mut().set(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn only_first_claim_wins() {
        let mut store = MemorySession::default();
        assert!(claim_first_visit(&mut store, "hasVisited"));
        assert_eq!(store.get("hasVisited").as_deref(), Some("true"));
        assert!(!claim_first_visit(&mut store, "hasVisited"));
        assert!(!claim_first_visit(&mut store, "hasVisited"));
    }

    #[test]
    fn any_stored_value_counts_as_visited() {
        let mut store = MemorySession::default();
        store.set("hasVisited", "1");
        assert!(!claim_first_visit(&mut store, "hasVisited"));
    }

    #[test]
    fn keys_are_independent() {
        let mut store = MemorySession::default();
        assert!(claim_first_visit(&mut store, "a"));
        assert!(claim_first_visit(&mut store, "b"));
    }

    /// Stands in for `sessionStorage`; clones share the same values.
    #[derive(Clone, Default)]
    struct FakeArea {
        values: Rc<RefCell<HashMap<String, String>>>,
        writes_throw: bool,
        reads_throw: bool,
    }

    impl StorageArea for FakeArea {
        fn read(&self, key: &str) -> Result<Option<String>, IntroError> {
            if self.reads_throw {
                return Err(IntroError::StorageUnavailable);
            }
            Ok(self.values.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> Result<(), IntroError> {
            if self.writes_throw {
                return Err(IntroError::Dom {
                    call: "sessionStorage.setItem",
                    detail: "QuotaExceededError".to_string(),
                });
            }
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn page_only_session_is_shared_across_handles() {
        let mut first = BrowserSession::<FakeArea>::page_only();
        assert!(claim_first_visit(&mut first, "page-only-test"));
        let mut second = BrowserSession::<FakeArea>::page_only();
        assert!(!claim_first_visit(&mut second, "page-only-test"));
    }

    #[test]
    fn working_storage_keeps_the_flag() {
        let area = FakeArea::default();
        let mut first = BrowserSession::with_storage(area.clone());
        assert!(claim_first_visit(&mut first, "hasVisited"));
        assert_eq!(area.values.borrow().get("hasVisited").map(String::as_str), Some("true"));
        assert!(!first.is_page_only());

        let mut second = BrowserSession::with_storage(area);
        assert!(!claim_first_visit(&mut second, "hasVisited"));
    }

    #[test]
    fn throwing_writes_still_show_the_intro_once_per_page() {
        let area = FakeArea {
            writes_throw: true,
            ..FakeArea::default()
        };
        let mut first = BrowserSession::with_storage(area.clone());
        assert!(claim_first_visit(&mut first, "quota-test"));
        assert!(first.is_page_only());
        assert!(area.values.borrow().is_empty());

        // A later mount opens storage afresh; the flag only lives in the page map.
        let mut second = BrowserSession::with_storage(area.clone());
        assert!(!claim_first_visit(&mut second, "quota-test"));
        let mut third = BrowserSession::with_storage(area);
        assert!(!claim_first_visit(&mut third, "quota-test"));
    }

    #[test]
    fn throwing_reads_fall_back_to_the_page_map() {
        let area = FakeArea {
            reads_throw: true,
            ..FakeArea::default()
        };
        let mut first = BrowserSession::with_storage(area.clone());
        assert!(claim_first_visit(&mut first, "read-test"));
        assert!(!first.is_page_only());
        assert_eq!(area.values.borrow().get("read-test").map(String::as_str), Some("true"));

        let mut second = BrowserSession::with_storage(area);
        assert!(!claim_first_visit(&mut second, "read-test"));
    }
}
