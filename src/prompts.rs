use crate::apis::gemini::{GenerateContentRequest, GenerationConfig};

pub const CODE_GENERATION_CONFIG: GenerationConfig =
    GenerationConfig { temperature: 0.7, max_output_tokens: 2048 };

pub const SUGGESTIONS_CONFIG: GenerationConfig =
    GenerationConfig { temperature: 0.9, max_output_tokens: 100 };

pub const KEY_TEST_PROMPT: &str = "Say \"ok\"";

const SUGGESTIONS_INSTRUCTION: &str = "\
You are a creative assistant helping complete visual art prompts. Given the current prompt, \
suggest 4-6 single words or short phrases (2 words max) that would make interesting visual \
directions.

Focus on:
- Geometric shapes and patterns
- Artistic styles and movements
- Moods and atmospheres
- Abstract concepts
- Visual compositions

RESPONSE FORMAT:
Return ONLY a comma-separated list of suggestions, nothing else. Keep each suggestion short \
(1-2 words).

Example for \"geometric\":
patterns, circles, fractals, minimal, recursive, grid

Example for \"\":
abstract, minimal, organic, geometric, flowing, sharp";

/// Colors the generated sketch has to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraints {
    pub foreground: String,
    pub background: String,
}

impl Constraints {
    pub fn new<F: Into<String>, B: Into<String>>(foreground: F, background: B) -> Self {
        Self { foreground: foreground.into(), background: background.into() }
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::new("#FFFFFF", "#000000")
    }
}

fn code_generation_instruction(constraints: &Constraints) -> String {
    let Constraints { foreground, background } = constraints;

    format!(
        "\
You are a p5.js code generator. Generate ONLY the drawing code (no setup, no createCanvas) that \
will be executed inside a p5.js draw function.

CONSTRAINTS:
- Canvas is 600x600 pixels (use p.width and p.height)
- Foreground color: {foreground}
- Background color: {background}
- The background is already set, don't call p.background()
- Use only these p5 functions: p.fill(), p.stroke(), p.strokeWeight(), p.noFill(), \
p.noStroke(), p.rect(), p.ellipse(), p.line(), p.point(), p.triangle(), p.quad(), p.arc(), \
p.beginShape(), p.vertex(), p.endShape(), p.push(), p.pop(), p.translate(), p.rotate(), \
p.scale(), p.text(), p.textSize(), p.textAlign()
- For colors, use the provided foreground/background or derive from them
- Make visuals centered and well-composed
- Keep code simple and elegant
- Do NOT use any external resources, images, or fonts
- Do NOT use loops that could cause infinite execution
- Do NOT use setTimeout, setInterval, or any async operations

RESPONSE FORMAT:
Return ONLY valid JavaScript code, no markdown, no explanations, no code fences. The code will \
be executed directly.

Example response for \"a simple circle\":
p.noFill();
p.stroke(255, 255, 255);
p.strokeWeight(2);
p.ellipse(p.width/2, p.height/2, 200, 200);"
    )
}

pub fn code_generation_request(
    prompt: &str,
    constraints: &Constraints,
) -> GenerateContentRequest<'static> {
    GenerateContentRequest::new(
        format!(
            "{}\n\nGenerate p5.js code for: \"{prompt}\"",
            code_generation_instruction(constraints)
        ),
        Some(CODE_GENERATION_CONFIG),
    )
}

pub fn key_test_request() -> GenerateContentRequest<'static> {
    GenerateContentRequest::new(KEY_TEST_PROMPT, None)
}

pub fn suggestions_request(current_prompt: &str) -> GenerateContentRequest<'static> {
    GenerateContentRequest::new(
        format!(
            "{SUGGESTIONS_INSTRUCTION}\n\nCurrent prompt: \"{}\"\n\nSuggest next words:",
            current_prompt.trim()
        ),
        Some(SUGGESTIONS_CONFIG),
    )
}
