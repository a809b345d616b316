use thiserror::Error;

use crate::document::RasterError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no reference sheet loaded for exam {exam_id:?}")]
    NotReady { exam_id: String },

    #[error("reference sheet for exam {exam_id:?} produced no pages")]
    EmptyReference { exam_id: String },

    #[error(transparent)]
    Raster(#[from] RasterError),
}
