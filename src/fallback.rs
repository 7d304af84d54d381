use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use sha2::{Digest, Sha256};

pub const GENERIC_QUOTE: &str =
    "I have important thoughts on this matter that deserve consideration.";

const QUOTES: &[(&str, &[&str])] = &[
    (
        "Elon Musk",
        &[
            "The future is not something we wait for, it's something we create. We need to think big and act boldly.",
            "Innovation requires taking risks and challenging the status quo. That's how we move humanity forward.",
            "Technology should serve humanity, not the other way around. We must be thoughtful about its development.",
            "We're at a critical juncture where our decisions today will shape the next century. Let's be bold.",
            "The status quo is not an option. We need revolutionary thinking to solve our biggest challenges.",
            "Progress comes from questioning everything and being willing to fail spectacularly.",
            "The best way to predict the future is to build it ourselves. Let's get to work.",
            "We need to think in terms of exponential growth, not linear progress.",
            "The most important thing is to have a vision and execute it relentlessly.",
        ],
    ),
    (
        "Steve Jobs",
        &[
            "Design is not just what it looks like and feels like. Design is how it works.",
            "Innovation distinguishes between a leader and a follower. We must think differently.",
            "The best way to predict the future is to invent it. Let's create something amazing.",
            "Quality is more important than quantity. One home run is much better than two doubles.",
            "Stay hungry, stay foolish. That's how we keep pushing boundaries.",
            "The intersection of technology and liberal arts is where magic happens.",
            "We're here to put a dent in the universe. Otherwise why else even be here?",
            "Simple can be harder than complex. You have to work hard to get your thinking clean.",
            "Your work is going to fill a large part of your life. Make sure it's something you love.",
        ],
    ),
    (
        "Albert Einstein",
        &[
            "Imagination is more important than knowledge. Knowledge is limited, imagination encircles the world.",
            "The important thing is not to stop questioning. Curiosity has its own reason for existence.",
            "We cannot solve our problems with the same thinking we used when we created them.",
            "The most incomprehensible thing about the world is that it is comprehensible.",
            "Logic will get you from A to B. Imagination will take you everywhere.",
            "The true sign of intelligence is not knowledge but imagination.",
            "In the middle of difficulty lies opportunity. We must embrace uncertainty.",
            "The world is a dangerous place, not because of those who do evil, but because of those who look on and do nothing.",
            "Peace cannot be kept by force; it can only be achieved by understanding.",
        ],
    ),
    (
        "Marie Curie",
        &[
            "Nothing in life is to be feared, it is only to be understood. Now is the time to understand more.",
            "Be less curious about people and more curious about ideas. That's where true progress lies.",
            "I am among those who think that science has great beauty. It brings us closer to truth.",
            "The way of progress is neither swift nor easy. We must be patient and persistent.",
            "I have no dress except the one I wear every day. If you are going to be kind enough to give me one, please let it be practical and dark so that I can put it on afterwards to go to the laboratory.",
            "One never notices what has been done; one can only see what remains to be done.",
            "I believe that science has great beauty. A scientist in his laboratory is not only a technician: he is also a child placed before natural phenomena which impress him like a fairy tale.",
            "The future belongs to those who believe in the beauty of their dreams.",
            "We must have perseverance and above all confidence in ourselves.",
        ],
    ),
    (
        "Nikola Tesla",
        &[
            "The present is theirs; the future, for which I really worked, is mine. Let's build the future together.",
            "The scientists of today think deeply instead of clearly. We need both depth and clarity.",
            "Invention is the most important product of man's creative brain. Let's invent the impossible.",
            "The day science begins to study non-physical phenomena, it will make more progress in one decade than in all the previous centuries of its existence.",
            "I don't care that they stole my idea. I care that they don't have any of their own.",
            "The spread of civilization may be likened to a fire; first, a feeble spark, next a flickering flame, then a mighty blaze, ever increasing in speed and power.",
            "Let the future tell the truth, and evaluate each one according to his work and accomplishments.",
            "The present is theirs; the future, for which I really worked, is mine.",
            "The scientists of today think deeply instead of clearly. One must be sane to think clearly, but one can think deeply and be quite insane.",
        ],
    ),
    (
        "Ada Lovelace",
        &[
            "The Analytical Engine weaves algebraic patterns just as the Jacquard loom weaves flowers and leaves.",
            "Imagination is the Discovering Faculty, pre-eminently. It is that which penetrates into the unseen worlds.",
            "The more I study, the more insatiable do I feel my genius for it to be. Knowledge is power.",
            "The science of operations, as derived from mathematics more especially, is a science of itself, and has its own abstract truth and value.",
            "I want to put in something about Bernoulli's numbers, in one of my notes, as an example of how the implicit function may be worked out by the engine, without having been worked out by human head and hands first.",
            "The Analytical Engine has no pretensions whatever to originate anything. It can do whatever we know how to order it to perform.",
            "I am much pleased to find how very well I stand work and how my powers of attention and continued effort increase.",
            "The intellectual, the moral, the religious seem to me all naturally bound up and interlinked together.",
            "That brain of mine is something more than merely mortal; as time will show.",
        ],
    ),
];

pub fn quotes_for(speaker: &str) -> Option<&'static [&'static str]> {
    QUOTES
        .iter()
        .find(|(name, _)| *name == speaker)
        .map(|(_, quotes)| *quotes)
}

fn seed_for(speaker: &str, topic: &str, context: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(format!("{speaker}_{topic}_{}", context.chars().count()));
    let digest = hasher.finalize();

    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(seed)
}

/// Same speaker, topic, and context length always give the same quote.
pub fn fallback_quote(speaker: &str, topic: &str, context: &str) -> &'static str {
    let Some(quotes) = quotes_for(speaker) else {
        return GENERIC_QUOTE;
    };

    let mut rng = StdRng::seed_from_u64(seed_for(speaker, topic, context));
    quotes.choose(&mut rng).copied().unwrap_or(GENERIC_QUOTE)
}
