//! Deciding when to vote in the game's move polls
//!
//! Each turn the game posts a board and then a poll asking which way the
//! snake should go. The bot normally only replies with its analysis, but if
//! nobody has voted shortly before the poll closes and the snake is about to
//! die, it casts the deciding vote itself.
//!
//! [`PollCoordinator`] only tracks where in that cycle we are. It performs no
//! I/O: whoever owns it feeds it [`PollMessage`]s and carries out the
//! [`Command`]s it returns, including running timers.
use fxhash::FxHashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::PollConfig;
use crate::render::vote_status;
use crate::types::Move;

/// Identifies one scheduled timer. Tokens are never reused, so a timer that
/// fires after the cycle it belonged to was abandoned can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

/// What the bot concluded about the board it just replied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVote {
    /// the game's post with the board
    pub update_id: String,
    /// the move the planner picked
    pub my_vote: Move,
    /// carrying on straight is fatal
    pub must_turn: bool,
    /// the bot's own reply, any vote announcement is threaded under it
    pub reply_to: String,
}

/// Input to [`PollCoordinator::handle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollMessage {
    /// a new board has been read and answered
    NewState(PendingVote),
    /// the game opened the poll for a board
    NewPoll {
        /// the board post the poll belongs to
        update_id: String,
        #[allow(missing_docs)]
        poll_id: String,
        /// option titles in the order they are shown
        options: Vec<String>,
        /// time until the poll closes
        expires_in: Duration,
    },
    /// a timer scheduled with [`Command::ScheduleTimer`] went off
    TimerFired {
        #[allow(missing_docs)]
        token: TimerToken,
        #[allow(missing_docs)]
        poll_id: String,
        /// votes cast so far
        votes_count: u64,
    },
}

/// Work for the owner of the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// fire [`PollMessage::TimerFired`] with this token after `delay`, along
    /// with the current vote count of the poll
    ScheduleTimer {
        #[allow(missing_docs)]
        token: TimerToken,
        #[allow(missing_docs)]
        poll_id: String,
        #[allow(missing_docs)]
        delay: Duration,
    },
    /// the timer is no longer wanted
    CancelTimer(TimerToken),
    /// post `status` under `reply_to`, then vote for `option` in the poll
    Vote {
        #[allow(missing_docs)]
        poll_id: String,
        /// index into the poll's options
        option: usize,
        #[allow(missing_docs)]
        reply_to: String,
        #[allow(missing_docs)]
        status: String,
    },
}

/// Where in the board, poll, timer cycle the coordinator is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollState {
    /// waiting for a new board
    Idle,
    /// board answered, waiting for its poll
    AwaitingPoll(PendingVote),
    /// poll seen, waiting to check on it just before it closes
    AwaitingTimer {
        #[allow(missing_docs)]
        pending: PendingVote,
        #[allow(missing_docs)]
        poll_id: String,
        /// poll option index for every move the poll offers
        options: FxHashMap<Move, usize>,
        #[allow(missing_docs)]
        timer: TimerToken,
    },
}

impl PollState {
    fn timer(&self) -> Option<TimerToken> {
        match self {
            PollState::AwaitingTimer { timer, .. } => Some(*timer),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            PollState::Idle => "idle",
            PollState::AwaitingPoll(_) => "awaiting poll",
            PollState::AwaitingTimer { .. } => "awaiting timer",
        }
    }
}

/// Pulls the move out of an option title such as `"⬅️ Move left"`
pub fn parse_option_title(title: &str) -> Option<Move> {
    let start = ["move ", "Move "]
        .iter()
        .filter_map(|prefix| title.find(prefix).map(|i| i + prefix.len()))
        .min()?;
    let word: String = title[start..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    word.parse().ok()
}

fn parse_options(options: &[String]) -> FxHashMap<Move, usize> {
    let mut lookup = FxHashMap::default();
    for (i, title) in options.iter().enumerate() {
        match parse_option_title(title) {
            Some(mv) => {
                lookup.insert(mv, i);
            }
            None => warn!(%title, "could not find a move in poll option"),
        }
    }
    lookup
}

/// The vote state machine. See the module docs.
#[derive(Debug)]
pub struct PollCoordinator {
    state: PollState,
    vote_margin: Duration,
    next_token: u64,
}

impl PollCoordinator {
    #[allow(missing_docs)]
    pub fn new(config: &PollConfig) -> Self {
        PollCoordinator {
            state: PollState::Idle,
            vote_margin: config.vote_margin(),
            next_token: 0,
        }
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> &PollState {
        &self.state
    }

    fn issue_token(&mut self) -> TimerToken {
        self.next_token += 1;
        TimerToken(self.next_token)
    }

    /// Advances the state machine by one message.
    ///
    /// A message that does not fit the current state resets to
    /// [`PollState::Idle`], cancelling any pending timer. A new board is
    /// then still accepted as the start of the next cycle. Timers that are
    /// not the one currently pending are ignored outright.
    #[instrument(level = "trace", skip_all)]
    pub fn handle(&mut self, message: PollMessage) -> Vec<Command> {
        let mut commands = Vec::new();
        let state = std::mem::replace(&mut self.state, PollState::Idle);

        let next = match (state, message) {
            (PollState::Idle, PollMessage::NewState(pending)) => {
                debug!(update_id = %pending.update_id, my_vote = %pending.my_vote, "waiting for poll");
                PollState::AwaitingPoll(pending)
            }
            (
                PollState::AwaitingPoll(pending),
                PollMessage::NewPoll {
                    update_id,
                    poll_id,
                    options,
                    expires_in,
                },
            ) if update_id == pending.update_id => {
                let options = parse_options(&options);
                let timer = self.issue_token();
                let delay = expires_in.saturating_sub(self.vote_margin);
                debug!(%poll_id, ?delay, "scheduling vote check");
                commands.push(Command::ScheduleTimer {
                    token: timer,
                    poll_id: poll_id.clone(),
                    delay,
                });
                PollState::AwaitingTimer {
                    pending,
                    poll_id,
                    options,
                    timer,
                }
            }
            (
                PollState::AwaitingTimer {
                    pending,
                    poll_id,
                    options,
                    timer,
                },
                PollMessage::TimerFired {
                    token,
                    poll_id: fired_for,
                    votes_count,
                },
            ) if token == timer && fired_for == poll_id => {
                if let Some(vote) = decide_vote(&pending, &options, poll_id, votes_count) {
                    commands.push(vote);
                }
                PollState::Idle
            }
            (state, PollMessage::TimerFired { token, .. }) if state.timer() != Some(token) => {
                debug!(?token, "ignoring stale timer");
                state
            }
            (state, message) => {
                warn!(state = state.name(), ?message, "unexpected poll message, resetting");
                if let Some(timer) = state.timer() {
                    commands.push(Command::CancelTimer(timer));
                }
                match message {
                    PollMessage::NewState(pending) => PollState::AwaitingPoll(pending),
                    _ => PollState::Idle,
                }
            }
        };

        self.state = next;
        commands
    }
}

fn decide_vote(
    pending: &PendingVote,
    options: &FxHashMap<Move, usize>,
    poll_id: String,
    votes_count: u64,
) -> Option<Command> {
    if votes_count > 0 {
        debug!(votes_count, "poll already has votes");
        return None;
    }
    if !pending.must_turn {
        debug!("snake is safe, not voting");
        return None;
    }
    let option = match options.get(&pending.my_vote) {
        Some(option) => *option,
        None => {
            warn!(my_vote = %pending.my_vote, "poll does not offer my move");
            return None;
        }
    };
    Some(Command::Vote {
        poll_id,
        option,
        reply_to: pending.reply_to.clone(),
        status: vote_status(pending.my_vote),
    })
}
