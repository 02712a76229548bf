pub mod studyhub;

use std::sync::Arc;

use crate::domain::models::ApiArc;

pub struct ApiManager {}

impl ApiManager {
    pub fn get() -> ApiArc {
        return Arc::new(studyhub::StudyHub::default());
    }
}
