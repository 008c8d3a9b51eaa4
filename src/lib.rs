//! Client for turning natural-language visual prompts into p5.js sketch code with the Gemini
//! API, plus API key checks and prompt suggestions.
//!
//! ```no_run
//! use sketch_codegen::{Config, Constraints, SketchGenerator};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = SketchGenerator::new(&Config::load()?)?;
//! let code = generator
//!     .generate_code("api-key", "a simple circle", &Constraints::new("#FFFFFF", "#000000"))
//!     .await?;
//! println!("{code}");
//! # Ok(())
//! # }
//! ```

pub mod apis;
pub mod prompts;
pub mod sketch;
pub mod utilities;

pub use prompts::Constraints;
pub use sketch::{GenerateCodeError, SketchGenerator};
pub use utilities::code_sanitizer::SanitizedCode;
pub use utilities::config::Config;
