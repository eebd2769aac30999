//! A service for greeting someone.

/// Returns a greeting based on someone's name.
pub fn greet(name: &str) -> String {
    format!("Hello, {name}!")
}
