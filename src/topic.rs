use rand::seq::IndexedRandom;
use tracing::warn;

use crate::api::{ApiClient, ApiFailure, Message};
use crate::reply::{self, ExtractionRules, TOPIC_MIN_LEN};

/// Speaker name that asks for a debate topic instead of a reply.
pub const TOPIC_GENERATOR: &str = "topic_generator";

const TEMPERATURE: f32 = 0.9;

const SYSTEM_PROMPT: &str =
    "Generate a debate topic (5-10 words max). Return ONLY the topic, nothing else.";

const TOPIC_PROMPTS: &[&str] = &[
    "Generate a debate topic about technology and society",
    "Create a debate topic about environmental challenges",
    "Suggest a debate topic about economic systems",
    "Propose a debate topic about human rights and freedoms",
    "Generate a debate topic about scientific advancement",
    "Create a debate topic about education and learning",
    "Suggest a debate topic about healthcare and medicine",
    "Propose a debate topic about space and exploration",
    "Generate a debate topic about privacy and security",
    "Create a debate topic about innovation and progress",
];

pub const FALLBACK_TOPICS: &[&str] = &[
    "The Ethics of Artificial Intelligence",
    "The Future of Renewable Energy",
    "Universal Basic Income: Solution or Problem?",
    "Space Exploration vs. Earth Conservation",
    "The Role of Government in Technology",
    "Privacy vs. Security in the Digital Age",
    "The Future of Work and Automation",
    "Climate Change: Individual vs. Systemic Action",
    "The Impact of Social Media on Democracy",
    "Genetic Engineering: Progress or Peril?",
    "The Future of Education in the AI Era",
    "Free Speech in the Age of Social Media",
    "The Ethics of Human Enhancement",
    "Centralized vs. Decentralized Systems",
    "The Future of Transportation and Mobility",
    "Digital Currency vs. Traditional Banking",
    "The Role of Art in Society",
    "Scientific Progress vs. Ethical Boundaries",
    "The Future of Healthcare Technology",
    "Urban Development vs. Environmental Protection",
];

fn pick(choices: &'static [&'static str]) -> &'static str {
    choices
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(FALLBACK_TOPICS[0])
}

async fn live_topic(api: &ApiClient) -> Result<String, ApiFailure> {
    let request = api.request(
        vec![Message::system(SYSTEM_PROMPT), Message::user(pick(TOPIC_PROMPTS))],
        TEMPERATURE,
    );

    let candidate = api
        .complete(&request)
        .await?
        .reply(&ExtractionRules::default())?
        .unwrap_or_default();

    reply::accept_reply(&candidate, TOPIC_MIN_LEN)
        .ok_or(ApiFailure::InvalidOrTooShortContent(candidate))
}

/// Always yields a topic; failures pick one of [`FALLBACK_TOPICS`].
pub async fn generate(api: &ApiClient) -> String {
    match live_topic(api).await {
        Ok(topic) => topic,
        Err(reason) => {
            let topic = pick(FALLBACK_TOPICS);
            warn!("{reason}, using fallback topic: {topic}");
            topic.to_owned()
        }
    }
}
