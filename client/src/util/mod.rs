//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from component logic
//! so the components stay declarative and the helpers stay testable.

pub mod config;
pub mod cookie;
pub mod use_fetch;
