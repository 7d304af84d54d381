use crate::speakers::SpeakerConfig;

/// How the speaker is asked to respond.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptMode {
    AnswerQuestion(String),
    ContinueDebate,
    OpenDebate,
}

impl PromptMode {
    /// An audience question takes priority over continuing the debate.
    pub fn select(user_question: Option<&str>, is_debate_continuation: bool) -> Self {
        match user_question.filter(|question| !question.is_empty()) {
            Some(question) => Self::AnswerQuestion(question.to_owned()),
            None if is_debate_continuation => Self::ContinueDebate,
            None => Self::OpenDebate,
        }
    }
}

pub fn build_system_prompt(
    speaker: &SpeakerConfig,
    topic: &str,
    context: &str,
    mode: &PromptMode,
) -> String {
    let name = &speaker.name;
    let mut prompt = format!("{}\n\nTopic: {topic}\n\n", speaker.prompt_template);

    if !context.is_empty() && *mode != PromptMode::OpenDebate {
        prompt.push_str(&format!("Previous conversation context:\n{context}\n\n"));
    }

    match mode {
        PromptMode::AnswerQuestion(question) => prompt.push_str(&format!(
            "Audience question: \"{question}\"\n\n\
             Respond as {name} in 2-3 sentences. Be direct and authentic to your character."
        )),
        PromptMode::ContinueDebate => prompt.push_str(&format!(
            "Continue the debate about {topic} as {name}. \
             Respond in 2-3 sentences. Stay in character and be direct."
        )),
        PromptMode::OpenDebate => prompt.push_str(&format!(
            "Start the debate about {topic} as {name}. \
             Give your initial thoughts in 2-3 sentences. Be engaging and authentic to your character."
        )),
    }

    prompt
}

pub fn build_user_message(speaker: &SpeakerConfig, topic: &str) -> String {
    format!("Respond as {} about {topic}", speaker.name)
}
