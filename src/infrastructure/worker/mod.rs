//! Worker Layer - Background Task Processing
//!
//! 实现 AutosaveWorker，处理防抖快照写入

mod autosave;

pub use autosave::{AutosaveWorker, AutosaveWorkerConfig};
