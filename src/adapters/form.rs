use crate::domain::ports::EnquiryForm;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A form held in memory, filled from command-line arguments.
#[derive(Debug, Default)]
pub struct MemoryForm {
    id: Option<String>,
    fields: Mutex<HashMap<String, String>>,
    busy: Mutex<bool>,
}

impl MemoryForm {
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_field(self, name: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.lock_fields().insert(name.to_string(), value);
        }
        self
    }

    pub fn is_busy(&self) -> bool {
        *self.busy.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_empty(&self) -> bool {
        self.lock_fields().is_empty()
    }

    // 鎖中毒時仍沿用內部資料
    fn lock_fields(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.fields.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EnquiryForm for MemoryForm {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        self.lock_fields().get(name).cloned()
    }

    fn reset(&self) {
        self.lock_fields().clear();
    }

    fn set_busy(&self, busy: bool) {
        *self.busy.lock().unwrap_or_else(|e| e.into_inner()) = busy;
    }
}
