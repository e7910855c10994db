//! Core types for the viewer session.

/// Generation: monotonically increasing token identifying one ingestion pass.
///
/// A forest installed under generation N is wholly replaced by the next
/// successful pass; results from a pass whose generation has been superseded
/// are discarded on arrival.
pub type Generation = u64;

/// HandleId: identifier of one issued playback handle
pub type HandleId = u64;
