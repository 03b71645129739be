//! Strategy prompt and response schema.

use marketmind_core::campaign::{POSTS_PER_CAMPAIGN, StrategyRequest};
use marketmind_core::error::{MarketmindError, Result};
use minijinja::{Environment, context};
use serde_json::{Value, json};

const STRATEGY_TEMPLATE: &str = r#"Act as a world-class social media marketing expert.
Create a mini-campaign strategy for the platform: {{ platform }}.

Topic/Product: {{ topic }}
Target Audience: {{ audience }}
Tone of Voice: {{ tone }}

Generate {{ post_count }} distinct social media posts.
For each post, provide:
1. A catchy headline (hook).
2. The caption body text (optimized for {{ platform }}).
3. Relevant hashtags.
4. A highly detailed image generation prompt that describes the visual to accompany the post."#;

/// Renders the natural-language strategy instruction.
pub fn render_strategy_prompt(request: &StrategyRequest) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("strategy", STRATEGY_TEMPLATE)
        .map_err(|e| MarketmindError::internal(format!("Invalid strategy template: {e}")))?;

    let template = env
        .get_template("strategy")
        .map_err(|e| MarketmindError::internal(e.to_string()))?;

    template
        .render(context! {
            platform => request.platform.to_string(),
            topic => &request.topic,
            audience => &request.audience,
            tone => &request.tone,
            post_count => POSTS_PER_CAMPAIGN,
        })
        .map_err(|e| MarketmindError::internal(format!("Failed to render strategy prompt: {e}")))
}

/// Structured-output schema requested from the text model.
pub fn strategy_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "campaignTitle": {
                "type": "STRING",
                "description": "A catchy name for this marketing campaign"
            },
            "posts": {
                "type": "ARRAY",
                "description": format!("List of {POSTS_PER_CAMPAIGN} generated posts"),
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "headline": { "type": "STRING" },
                        "body": { "type": "STRING" },
                        "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "imagePrompt": {
                            "type": "STRING",
                            "description": "A detailed physical description of the image to generate, including style, lighting, and subject."
                        }
                    },
                    "required": ["headline", "body", "hashtags", "imagePrompt"]
                }
            }
        },
        "required": ["campaignTitle", "posts"]
    })
}
