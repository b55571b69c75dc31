// Fixed greeting/farewell auto-replies.

pub struct KeywordReply {
    pub trigger: &'static str,
    pub reply: &'static str,
}

pub const KEYWORD_REPLIES: [KeywordReply; 2] = [
    KeywordReply {
        trigger: "good morning",
        reply: "Good morning 🌞 Have a great day!",
    },
    KeywordReply {
        trigger: "goodbye",
        reply: "Goodbye 👋 See you next time!",
    },
];

/// Replies for every trigger contained in the message (case-insensitive).
/// Triggers are checked independently, so one message can fire several.
pub fn keyword_replies(content: &str) -> Vec<&'static str> {
    let lowered = content.to_lowercase();
    KEYWORD_REPLIES
        .iter()
        .filter(|k| lowered.contains(k.trigger))
        .map(|k| k.reply)
        .collect()
}
