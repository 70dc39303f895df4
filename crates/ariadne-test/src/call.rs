//! Recorded resolution calls.

use std::sync::Arc;

use parking_lot::Mutex;

/// A resolution call made on a fixture model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// `resolve_route_binding` on a prototype of `type_name`.
    Direct {
        /// The prototype's type.
        type_name: String,
        /// The raw value.
        value: String,
        /// The binding-field override.
        field: Option<String>,
    },
    /// `resolve_child_route_binding` on a resolved parent.
    Scoped {
        /// The parent's type.
        parent_type: String,
        /// The parent's route key.
        parent_key: String,
        /// The child parameter name.
        parameter: String,
        /// The raw value.
        value: String,
        /// The binding-field override.
        field: Option<String>,
    },
}

impl Call {
    /// Creates a direct call record.
    #[must_use]
    pub fn direct(type_name: &str, value: &str, field: Option<&str>) -> Self {
        Self::Direct {
            type_name: type_name.to_string(),
            value: value.to_string(),
            field: field.map(ToString::to_string),
        }
    }

    /// Creates a scoped call record.
    #[must_use]
    pub fn scoped(
        parent_type: &str,
        parent_key: &str,
        parameter: &str,
        value: &str,
        field: Option<&str>,
    ) -> Self {
        Self::Scoped {
            parent_type: parent_type.to_string(),
            parent_key: parent_key.to_string(),
            parameter: parameter.to_string(),
            value: value.to_string(),
            field: field.map(ToString::to_string),
        }
    }
}

/// Shared, append-only call log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a call.
    pub fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    /// Returns a snapshot of the recorded calls.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    /// Forgets all recorded calls.
    pub fn clear(&self) {
        self.calls.lock().clear();
    }
}
