// src/models/secret.rs

use serde::{Deserialize, Serialize};

/// One numbered entry of the fixed surgery-secrets reference list.
/// The ordinal doubles as identifier and display index. Never mutated
/// at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgerySecret {
    pub number: i64,
    pub point: String,
}
