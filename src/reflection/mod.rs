//! Reflection domain: question categories, parsed questions and session state

mod questions;
mod session;

pub use questions::{Category, ReflectionQuestions};
pub use session::Session;
