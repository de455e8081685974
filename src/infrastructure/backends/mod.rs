pub mod gemini;

use std::sync::Arc;

use crate::domain::models::Backend;

pub type BackendBox = Arc<dyn Backend + Send + Sync>;

pub struct BackendManager {}

impl BackendManager {
    pub fn get() -> BackendBox {
        return Arc::<gemini::Gemini>::default();
    }
}
