pub mod code_sanitizer;
pub mod config;
pub mod logchamp;
pub mod suggestions;

#[cfg(test)]
pub mod test_fixtures;
