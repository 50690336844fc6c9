//! Compile-and-publish pipeline components.

mod prepare;
mod publish;
mod target;

pub use prepare::{DirectoryState, ensure_directory, ensure_directory_async};
pub use publish::{Outcome, PublishOptions, PublishReport, Publisher};
pub use target::PublishTarget;
