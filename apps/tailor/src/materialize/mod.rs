// Output materialization: artifacts → validated collections → partitions →
// rendered documents under `{output_root}/{company}-{job_title}/`.

pub mod pairing;
pub mod pipeline;
pub mod report;
pub mod writer;

pub use pairing::{index_applications, Application};
pub use pipeline::{finalize, materialize, MaterializeRequest, RunState};
pub use report::{ArtifactKind, ArtifactReport, ArtifactStatus, MaterializeReport};
