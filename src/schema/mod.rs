pub mod classify;
pub mod reflow;

pub use classify::{AcceptRule, Classification, PrimitiveKind, classify, classify_type};
pub use reflow::{ReflowError, parse, reflow, render};
