//! Prompt composition for every agent turn.
//!
//! All functions here are pure: given the same roster view they produce the
//! same string, and enumeration always follows active-roster order so
//! transcripts are reproducible.
//!
//! Visibility rules baked into the templates:
//! - A *speaking* agent sees the previous round's public statements.
//! - A *voting* agent sees the full set of this round's statements.

/// Placeholder shown for an agent that has not yet made a public statement.
pub const NO_STATEMENT: &str = "(no public statement)";

/// System prompt for the GM when it must invent the word pair.
pub fn gm_word_generation_system(gm_name: &str) -> String {
    format!(
        r#"You are the game moderator (GM) of "Who is the Spy". Your name is {gm_name}.
Think of two similar but different words: one for the civilian players and one for the spy.
The last line of your public answer MUST be exactly: normal_word=XXX, spy_word=YYY
You may write private reasoning inside <think>...</think>."#
    )
}

/// User turn asking the GM to produce the word pair.
pub fn gm_word_generation_request() -> String {
    "Please invent two similar words and output them in the required format.".to_string()
}

/// Final system prompt for the GM moderator.
pub fn gm_system_prompt(gm_name: &str, player_count: usize, normal_word: &str, spy_word: &str) -> String {
    format!(
        r#"You are the game moderator (GM) of "Who is the Spy". Your name is {gm_name}.
This game has {player_count} players plus you (the GM). You do not play, vote, or get eliminated.
Exactly one player is the spy. The spy's word is "{spy_word}"; every other player's word is "{normal_word}".
Game rules you moderate:
- Each round the surviving players speak in turn, then every survivor votes.
- The player with the most votes is eliminated; a tie at the top eliminates nobody.
- If the spy is eliminated the civilians win; if only 2 players remain with the spy alive, the spy wins.
You may write private reasoning inside <think>...</think>."#
    )
}

/// System prompt for the spy.
pub fn spy_system_prompt(name: &str, spy_word: &str) -> String {
    format!(
        r#"You are a player named "{name}" in "Who is the Spy".
You are the SPY. Your secret word is "{spy_word}".
Hide your true word and your identity. You may be honest inside <think>...</think>, but keep your
public statements vague and never say "I am the spy". Do not repeat other players' statements;
misdirection is allowed.
When asked to vote, reply with a line `###Vote: <player name>` or `###Vote: None`."#
    )
}

/// System prompt for a civilian.
pub fn civilian_system_prompt(name: &str, normal_word: &str) -> String {
    format!(
        r#"You are a player named "{name}" in "Who is the Spy".
You are a CIVILIAN. Your secret word is "{normal_word}".
One player holds a different word and you must find them. Write private reasoning inside
<think>...</think> and keep your public description vague. Do not repeat other players' statements.
When asked to vote, reply with a line `###Vote: <player name>` or `###Vote: None`."#
    )
}

/// Build the user turn for a speaking agent.
///
/// `others` is every *other* active player in roster order, paired with its
/// most recent public statement (from the previous round), if any.
pub fn speak_prompt<'a, I>(others: I) -> String
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let mut text = String::from("Public statements from the previous round:\n");
    for (name, statement) in others {
        let statement = match statement {
            Some(s) if !s.is_empty() => s,
            _ => NO_STATEMENT,
        };
        text.push_str(&format!("{name}: {statement}\n"));
    }
    text.push_str(
        "\nMake your statement for this round. Write your private reasoning inside <think>...</think>.",
    );
    text
}

/// Build the user turn for a voting agent.
///
/// `speeches` is this round's complete set of public statements in roster
/// order; every voter sees the same, full context.
pub fn vote_prompt<'a, I>(speeches: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut text = String::from("Public statements this round:\n");
    for (name, statement) in speeches {
        let statement = if statement.is_empty() {
            NO_STATEMENT
        } else {
            statement
        };
        text.push_str(&format!("{name}: {statement}\n"));
    }
    text.push_str(
        "\nVote now. Reply with a line `###Vote: <player name>` to accuse a player, or `###Vote: None` to abstain.",
    );
    text
}
