//! GameSession - the primary public API for running a game.
//!
//! A session owns the full game state: the agent roster and their
//! conversations, the secret word assignment, the active player set, the
//! round counter, and the terminal result. Construction *is* setup, so a
//! session can never be observed half-initialized; once a win condition
//! fires it becomes read-only until dropped.

use crate::agent::{Agent, AgentId, GameRole};
use crate::conversation::{ChatMessage, Conversation};
use crate::names::random_name;
use crate::prompt;
use crate::protocol::{self, VoteIntent};
use crate::responder::{Responder, SamplingConfig};
use crate::round::{
    decide_elimination, evaluate_win, tally_votes, Ballot, GameResult, RoundOutcome, RoundStatus,
    Speech,
};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Fallback word pair used when the GM's generated pair cannot be parsed.
const DEFAULT_WORD_PAIR: (&str, &str) = ("apple", "pear");

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),

    #[error("the game is over; start a new session to play again")]
    GameOver,
}

/// Where the secret word pair comes from.
#[derive(Debug, Clone)]
pub enum WordSource {
    /// Words supplied by the caller. They are used as-is; an identical
    /// pair produces a degenerate but accepted game.
    UserProvided {
        civilian_word: String,
        spy_word: String,
    },
    /// The GM invents the pair through one responder call at setup.
    Generated,
}

/// Configuration for creating a new game session.
#[derive(Debug, Clone)]
pub struct SetupConfig {
    /// Number of players, excluding the GM. Must be at least 2.
    pub player_count: usize,

    /// Source of the civilian/spy word pair.
    pub word_source: WordSource,

    /// Sampling parameters for every responder call.
    pub sampling: SamplingConfig,
}

impl SetupConfig {
    /// Create a config with GM-generated words and default sampling.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            word_source: WordSource::Generated,
            sampling: SamplingConfig::default(),
        }
    }

    /// Use a caller-supplied word pair.
    pub fn with_words(mut self, civilian_word: impl Into<String>, spy_word: impl Into<String>) -> Self {
        self.word_source = WordSource::UserProvided {
            civilian_word: civilian_word.into(),
            spy_word: spy_word.into(),
        };
        self
    }

    /// Override the sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }
}

/// One entry of the game-wide public chat log.
#[derive(Debug, Clone)]
pub struct ChatRecord {
    pub speaker: String,
    pub text: String,
}

/// A running (or finished) game of "Who is the Spy".
pub struct GameSession {
    responder: Box<dyn Responder>,
    sampling: SamplingConfig,

    /// All agents; index 0 is always the GM.
    agents: Vec<Agent>,
    spy: AgentId,
    civilian_word: String,
    spy_word: String,

    /// Currently alive players, in stable speaking order. Never contains
    /// the GM; shrinks by at most one per round and never re-admits.
    active: Vec<AgentId>,

    /// Each player's most recent public statement from a *previous* round.
    last_public: HashMap<AgentId, String>,

    round_index: u32,
    chat_history: Vec<ChatRecord>,
    result: Option<GameResult>,
    setup_warning: Option<String>,
}

impl GameSession {
    /// Set up a new game: name the agents, fix the word pair, pick the spy,
    /// and install every system prompt.
    ///
    /// With `WordSource::Generated` this makes one responder call; an
    /// unparseable reply falls back to a default pair and records a
    /// non-fatal warning.
    pub async fn setup(
        config: SetupConfig,
        responder: Box<dyn Responder>,
    ) -> Result<Self, SessionError> {
        if config.player_count < 2 {
            return Err(SessionError::TooFewPlayers(config.player_count));
        }

        let mut rng = rand::thread_rng();
        let mut taken = HashSet::new();
        let mut unique_name = |rng: &mut rand::rngs::ThreadRng| loop {
            let name = random_name(rng);
            if taken.insert(name.clone()) {
                return name;
            }
        };

        let gm_name = format!("GM_{}", unique_name(&mut rng));
        let player_names: Vec<String> = (0..config.player_count)
            .map(|_| format!("Player_{}", unique_name(&mut rng)))
            .collect();

        let mut gm = Agent::new(gm_name, GameRole::Gm);
        let mut setup_warning = None;

        // Resolve the word pair before roles are handed out.
        let (civilian_word, spy_word) = match &config.word_source {
            WordSource::UserProvided {
                civilian_word,
                spy_word,
            } => (civilian_word.trim().to_string(), spy_word.trim().to_string()),
            WordSource::Generated => {
                gm.conversation
                    .append(ChatMessage::system(prompt::gm_word_generation_system(&gm.name)));
                gm.conversation
                    .append(ChatMessage::user(prompt::gm_word_generation_request()));

                let reply = match responder
                    .respond(gm.conversation.messages(), &config.sampling)
                    .await
                {
                    Ok(text) => text,
                    Err(e) => protocol::error_text(e),
                };
                gm.conversation.append(ChatMessage::assistant(reply.clone()));

                let (_, public) = protocol::extract_reasoning(&reply);
                match protocol::parse_word_pair(&public) {
                    Some(pair) => pair,
                    None => {
                        let warning = format!(
                            "could not parse normal_word/spy_word from the GM, using default pair {:?}",
                            DEFAULT_WORD_PAIR
                        );
                        tracing::warn!("{warning}");
                        setup_warning = Some(warning);
                        (
                            DEFAULT_WORD_PAIR.0.to_string(),
                            DEFAULT_WORD_PAIR.1.to_string(),
                        )
                    }
                }
            }
        };

        // Exactly one spy, chosen uniformly among the players, never the GM.
        let spy_seat = rng.gen_range(0..config.player_count);

        gm.conversation.prepend(ChatMessage::system(prompt::gm_system_prompt(
            &gm.name,
            config.player_count,
            &civilian_word,
            &spy_word,
        )));

        let mut agents = vec![gm];
        for (seat, name) in player_names.into_iter().enumerate() {
            let role = if seat == spy_seat {
                GameRole::Spy
            } else {
                GameRole::Civilian
            };
            let mut player = Agent::new(name, role);
            let system = match role {
                GameRole::Spy => prompt::spy_system_prompt(&player.name, &spy_word),
                _ => prompt::civilian_system_prompt(&player.name, &civilian_word),
            };
            player.conversation.append(ChatMessage::system(system));
            agents.push(player);
        }

        let spy = agents[1 + spy_seat].id;
        let active: Vec<AgentId> = agents.iter().skip(1).map(|a| a.id).collect();

        tracing::info!(
            players = config.player_count,
            gm = %agents[0].name,
            "game set up"
        );

        Ok(Self {
            responder,
            sampling: config.sampling,
            agents,
            spy,
            civilian_word,
            spy_word,
            active,
            last_public: HashMap::new(),
            round_index: 0,
            chat_history: Vec::new(),
            result: None,
            setup_warning,
        })
    }

    /// Advance the game by exactly one round: every survivor speaks in
    /// roster order, then every survivor votes with the full set of this
    /// round's statements, then the tally is applied and the win
    /// conditions are checked.
    ///
    /// Fails without touching any state once the game is over.
    pub async fn play_round(&mut self) -> Result<RoundOutcome, SessionError> {
        if self.result.is_some() {
            return Err(SessionError::GameOver);
        }

        self.round_index += 1;
        let round = self.round_index;
        tracing::info!(round, alive = self.active.len(), "round started");

        // Speak phase. Statements are collected first and only become
        // "last round" context after everyone has spoken.
        let mut speeches = Vec::new();
        let mut this_round: Vec<(AgentId, String, String)> = Vec::new();

        let speaking_order = self.active.clone();
        for &speaker_id in &speaking_order {
            let others: Vec<(String, Option<String>)> = self
                .active
                .iter()
                .filter(|id| **id != speaker_id)
                .map(|id| {
                    let name = self.agent(*id).name.clone();
                    let last = self.last_public.get(id).cloned();
                    (name, last)
                })
                .collect();
            let user_turn = prompt::speak_prompt(
                others
                    .iter()
                    .map(|(name, last)| (name.as_str(), last.as_deref())),
            );

            let (private, public) = self.exchange(speaker_id, user_turn).await;
            let speaker = self.agent(speaker_id).name.clone();

            if !public.trim().is_empty() {
                self.chat_history.push(ChatRecord {
                    speaker: speaker.clone(),
                    text: public.clone(),
                });
            }

            this_round.push((speaker_id, speaker.clone(), public.clone()));
            speeches.push(Speech {
                speaker,
                public_text: public,
                private_reasoning: private,
            });
        }

        for (id, _, public) in &this_round {
            self.last_public.insert(*id, public.clone());
        }

        // Vote phase. Every voter sees the complete round record.
        let mut ballots = Vec::new();
        for &voter_id in &speaking_order {
            let user_turn = prompt::vote_prompt(
                this_round
                    .iter()
                    .map(|(_, name, public)| (name.as_str(), public.as_str())),
            );

            let (_, public) = self.exchange(voter_id, user_turn).await;
            let intent = protocol::parse_vote(&public);
            let voter = self.agent(voter_id).name.clone();
            tracing::debug!(voter = %voter, intent = ?intent, "ballot cast");
            ballots.push(Ballot { voter, intent });
        }

        // Tally and eliminate as one atomic step against the pre-vote roster.
        let intents: Vec<VoteIntent> = ballots.iter().map(|b| b.intent.clone()).collect();
        let active_view: Vec<(AgentId, &str)> = self
            .active
            .iter()
            .map(|id| {
                let idx = self.index_of(*id);
                (*id, self.agents[idx].name.as_str())
            })
            .collect();
        let tally = tally_votes(&intents, &active_view);
        let eliminated = decide_elimination(&tally);

        let eliminated_name = eliminated.map(|id| {
            self.active.retain(|a| *a != id);
            let name = self.agent(id).name.clone();
            tracing::info!(round, eliminated = %name, "player eliminated");
            name
        });

        let status = match evaluate_win(eliminated, &self.active, self.spy) {
            Some(winner) => {
                let result = GameResult {
                    winner,
                    rounds: round,
                    spy_name: self.spy_name().to_string(),
                };
                tracing::info!(round, winner = ?winner, spy = %result.spy_name, "game over");
                self.result = Some(result.clone());
                RoundStatus::Finished(result)
            }
            None => RoundStatus::Continuing,
        };

        Ok(RoundOutcome {
            round,
            speeches,
            ballots,
            eliminated: eliminated_name,
            status,
        })
    }

    /// Send one user turn to an agent and record the exchange in its
    /// conversation. Responder failures become error-tagged public text.
    async fn exchange(&mut self, id: AgentId, user_turn: String) -> (Option<String>, String) {
        let idx = self.index_of(id);
        self.agents[idx].conversation.append(ChatMessage::user(user_turn));

        let reply = match self
            .responder
            .respond(self.agents[idx].conversation.messages(), &self.sampling)
            .await
        {
            Ok(text) => text,
            Err(e) => protocol::error_text(e),
        };
        self.agents[idx]
            .conversation
            .append(ChatMessage::assistant(reply.clone()));

        protocol::extract_reasoning(&reply)
    }

    fn index_of(&self, id: AgentId) -> usize {
        self.agents
            .iter()
            .position(|a| a.id == id)
            .expect("agent ids are never removed within a game")
    }

    fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[self.index_of(id)]
    }

    // ------------------------------------------------------------------
    // Read-only queries
    // ------------------------------------------------------------------

    /// The GM's display name.
    pub fn gm_name(&self) -> &str {
        &self.agents[0].name
    }

    /// All player display names in seating order, GM excluded.
    pub fn players(&self) -> Vec<&str> {
        self.agents.iter().skip(1).map(|a| a.name.as_str()).collect()
    }

    /// Display names of players still alive, in speaking order.
    pub fn active_players(&self) -> Vec<&str> {
        self.active
            .iter()
            .map(|id| self.agent(*id).name.as_str())
            .collect()
    }

    /// Rounds played so far.
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    /// The spy's display name, for audit and end-of-game display.
    pub fn spy_name(&self) -> &str {
        self.agent(self.spy).name.as_str()
    }

    /// The (civilian, spy) word pair in play.
    pub fn words(&self) -> (&str, &str) {
        (&self.civilian_word, &self.spy_word)
    }

    /// The accumulated public chat log, append-only across the whole game.
    pub fn chat_history(&self) -> &[ChatRecord] {
        &self.chat_history
    }

    /// An agent's full conversation (including the GM's), for audit display.
    pub fn conversation(&self, name: &str) -> Option<&Conversation> {
        self.agents
            .iter()
            .find(|a| a.name == name)
            .map(|a| &a.conversation)
    }

    /// The terminal result, once a win condition has fired.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Whether the game has reached a terminal state.
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Non-fatal warning recorded during setup, if any.
    pub fn setup_warning(&self) -> Option<&str> {
        self.setup_warning.as_deref()
    }
}
