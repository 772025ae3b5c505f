use crate::api::{ApiError, QueryResponse};

/// Events sent back to the draw loop by request tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A request settled, successfully or not. The generation ties the
    /// outcome to the submission that started it.
    Finished {
        generation: u64,
        outcome: Result<QueryResponse, ApiError>,
    },
}
