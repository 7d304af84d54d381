mod api;
mod fallback;
mod prompt;
mod reply;
mod speaker;
mod speakers;
mod topic;

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;
use structopt::clap::AppSettings;
use tracing::{debug, error};

use api::ApiClient;
use prompt::PromptMode;

fn default_api_url() -> String {
    api::DEFAULT_API_URL.to_owned()
}

fn default_model() -> String {
    api::DEFAULT_MODEL.to_owned()
}

fn default_timeout_secs() -> u64 {
    api::DEFAULT_TIMEOUT_SECS
}

#[derive(Deserialize, Debug)]
struct Environment {
    gmi_api_key: Option<String>,
    #[serde(default = "default_api_url")]
    gmi_api_url: String,
    #[serde(default = "default_model")]
    gmi_model: String,
    #[serde(default = "default_timeout_secs")]
    gmi_timeout_secs: u64,
    gmi_max_tokens: Option<u32>,
}

#[derive(StructOpt, Debug)]
#[structopt(
    name = "debate-speaker",
    about = "Ask a debate speaker persona for a reply, or generate a debate topic",
    setting = AppSettings::AllowLeadingHyphen,
    after_help = "EXAMPLES:\n    debate-speaker 'Elon Musk' 'AI Ethics'\n    \
                  debate-speaker 'Steve Jobs' 'Design Philosophy' 'Previous context here' 'User question here' true\n    \
                  debate-speaker topic_generator -"
)]
struct Args {
    /// Path to a speakers.json file, searched before the default locations
    #[structopt(long, parse(from_os_str))]
    speakers: Option<PathBuf>,

    /// Speaker name as listed in speakers.json, or `topic_generator`
    #[structopt(allow_hyphen_values = true)]
    speaker_name: Option<String>,

    /// Debate topic
    #[structopt(allow_hyphen_values = true)]
    topic: Option<String>,

    /// Previous conversation context
    #[structopt(allow_hyphen_values = true)]
    context: Option<String>,

    /// Audience question to answer
    #[structopt(allow_hyphen_values = true)]
    user_question: Option<String>,

    /// `true` to continue an ongoing debate
    #[structopt(allow_hyphen_values = true)]
    is_debate_continuation: Option<String>,

    /// Ignored
    #[structopt(hidden = true, allow_hyphen_values = true)]
    _surplus: Vec<String>,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debate_speaker=info".to_string()),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::from_args();

    let (Some(speaker_name), Some(topic)) = (&args.speaker_name, &args.topic) else {
        Args::clap().print_help()?;
        println!();
        return Ok(());
    };

    let environment = envy::from_env::<Environment>()?;

    let context = args.context.as_deref().unwrap_or_default();
    let is_debate_continuation = args
        .is_debate_continuation
        .as_deref()
        .is_some_and(|flag| flag.eq_ignore_ascii_case("true"));
    let mode = PromptMode::select(args.user_question.as_deref(), is_debate_continuation);
    debug!("speaker: {speaker_name:?}, topic: {topic:?}, mode: {mode:?}");

    let api = ApiClient::new(
        environment.gmi_api_url,
        environment.gmi_model,
        environment.gmi_api_key,
        Duration::from_secs(environment.gmi_timeout_secs),
    )?
    .with_max_tokens(environment.gmi_max_tokens);

    if speaker_name == topic::TOPIC_GENERATOR {
        println!("{}", topic::generate(&api).await);
        return Ok(());
    }

    let speakers = speakers::load(args.speakers.as_deref());
    let Some(speaker) = speakers.get(speaker_name) else {
        error!("Speaker '{speaker_name}' not found in configuration");
        debug!("Available speakers: {:?}", speakers.keys().collect::<Vec<_>>());
        return Ok(());
    };

    let response = speaker::respond(&api, speaker, topic, context, &mode).await;
    for line in response.output_lines() {
        println!("{line}");
    }

    Ok(())
}
