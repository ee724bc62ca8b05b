//! Session state written back on change.

use serde::{Deserialize, Serialize};

/// Session state persisted between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Dark theme toggle. `None` until the user toggles for the first time.
    #[serde(default)]
    pub dark_theme: Option<bool>,
}
