//! Parser for `<actor> !<command> [args]` lines.
//!
//! The parser only recognizes syntax. Whether the actor is an operator is
//! decided by the caller from the season config; whether the command is
//! allowed right now is decided by the season service.

use showrunner_application::Intent;
use showrunner_domain::{CompetitionKind, ParticipantId, ParticipantOrder};
use thiserror::Error;

/// Command reference printed for unknown commands
pub const USAGE: &str = "\
Commands (each line: <actor> !<command> [args]):
  !register [display name]   join the game
  !start_season              start a new season (operator)
  !assign_hoh <id>           name the head of round (operator)
  !assign_pov <id>           name the veto holder (operator)
  !nominate <id>             nominate a player (head of round)
  !use_veto <id>             save a nominee (head of round, veto holder, operator)
  !double_eviction           make this round a double eviction (operator)
  !start_vote                open eviction voting (operator)
  !vote <id>                 vote to evict a nominee, or for a finalist as a juror
  !end_vote                  close voting and evict (operator)
  !start_comp <kind>         start a timed competition (operator)
  !answer <text>             answer the running competition
  !end_comp                  end the running competition now (operator)
  !use_power                 revoke your vote this round (once per season)
  !declare_finale            start the finale (operator)
  !reveal_winner             reveal the season winner (operator)
  !scoreboard [points|wins|name]  show the standings";

/// A parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub actor: ParticipantId,
    pub intent: Intent,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected `<actor> !<command> [args]`")]
    Malformed,

    #[error("unknown command `!{0}`")]
    UnknownCommand(String),

    #[error("`!{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("`!{command}` does not understand `{value}`; expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Parse one console line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<CommandLine>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (actor, rest) = split_word(line);
    let (command, args) = split_word(rest);
    let Some(command) = command.strip_prefix('!') else {
        return Err(ParseError::Malformed);
    };
    if command.is_empty() {
        return Err(ParseError::Malformed);
    }

    let intent = match command.to_lowercase().as_str() {
        "register" => Intent::Register {
            display_name: (!args.is_empty()).then(|| args.to_string()),
        },
        "start_season" => Intent::StartSeason,
        "assign_hoh" => Intent::AssignRoundWinner(participant(args, "assign_hoh")?),
        "assign_pov" => Intent::AssignVetoWinner(participant(args, "assign_pov")?),
        "nominate" => Intent::Nominate(participant(args, "nominate")?),
        "use_veto" => Intent::UseVeto(participant(args, "use_veto")?),
        "double_eviction" => Intent::ScheduleDoubleEviction,
        "start_vote" => Intent::StartVoting,
        "vote" => Intent::CastVote(participant(args, "vote")?),
        "end_vote" => Intent::EndVoting,
        "start_comp" => {
            let (kind, _) = split_word(args);
            if kind.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "start_comp",
                    expected: "a competition kind",
                });
            }
            Intent::StartCompetition(CompetitionKind::new(kind))
        }
        "answer" => {
            if args.is_empty() {
                return Err(ParseError::MissingArgument {
                    command: "answer",
                    expected: "an answer",
                });
            }
            Intent::SubmitAnswer(args.to_string())
        }
        "end_comp" => Intent::EndCompetition,
        "use_power" => Intent::UseSecretPower,
        "declare_finale" => Intent::DeclareFinale,
        "reveal_winner" => Intent::RevealWinner,
        "scoreboard" => Intent::Scoreboard(order(args)?),
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(CommandLine {
        actor: ParticipantId::new(actor),
        intent,
    }))
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim()),
        None => (s, ""),
    }
}

fn order(args: &str) -> Result<ParticipantOrder, ParseError> {
    let (order, _) = split_word(args);
    match order.to_lowercase().as_str() {
        "" | "points" => Ok(ParticipantOrder::Points),
        "wins" | "hoh" => Ok(ParticipantOrder::RoundWins),
        "name" => Ok(ParticipantOrder::Name),
        other => Err(ParseError::InvalidArgument {
            command: "scoreboard",
            value: other.to_string(),
            expected: "points, wins or name",
        }),
    }
}

fn participant(args: &str, command: &'static str) -> Result<ParticipantId, ParseError> {
    let (id, _) = split_word(args);
    // Chat mentions often carry a leading `@`
    let id = id.trim_start_matches('@');
    if id.is_empty() {
        return Err(ParseError::MissingArgument {
            command,
            expected: "a participant id",
        });
    }
    Ok(ParticipantId::new(id))
}
