pub mod arrangement;

pub use arrangement::{create_faces, Arrangement, ArrangementParams, CreateFaces};
