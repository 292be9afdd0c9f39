//! Console output formatter for command outcomes

use crate::command::parser::{ParseError, USAGE};
use colored::Colorize;
use serde_json::json;
use showrunner_domain::{
    AnswerOutcome, GameError, Outcome, Participant, ParticipantId, ResolutionCause,
    SeasonSnapshot,
};

/// Formats outcomes, rejections and scoreboards for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One line describing an accepted command
    pub fn format_outcome(outcome: &Outcome) -> String {
        let line = match outcome {
            Outcome::Registered {
                participant,
                created,
            } => {
                if *created {
                    format!("registered {}", participant)
                } else {
                    format!("{} is already registered", participant)
                }
            }
            Outcome::SeasonStarted {
                season_number,
                round,
                participants,
            } => format!(
                "season {} started: round {}, {} players",
                season_number, round, participants
            ),
            Outcome::RoundWinnerAssigned { participant, round } => {
                format!("{} is head of round {}", participant, round)
            }
            Outcome::VetoWinnerAssigned { participant, round } => {
                format!("{} holds the veto for round {}", participant, round)
            }
            Outcome::Nominated {
                target,
                nominees,
                phase,
            } => format!(
                "nominated {} (nominees: {}; now {})",
                target,
                join(nominees),
                phase
            ),
            Outcome::VetoUsed { removed, nominees } => {
                format!("veto used on {} (nominees: {})", removed, join(nominees))
            }
            Outcome::DoubleEvictionScheduled { round } => {
                format!("round {} is a double eviction", round)
            }
            Outcome::VotingOpened { round, nominees } => {
                format!("voting open for round {}: {}", round, join(nominees))
            }
            Outcome::VoteRecorded {
                voter,
                target,
                replaced,
                ..
            } => {
                if *replaced {
                    format!("vote changed: {} -> {}", voter, target)
                } else {
                    format!("vote recorded: {} -> {}", voter, target)
                }
            }
            Outcome::Evicted {
                evicted,
                tally,
                round,
                next_round,
                next_phase,
            } => format!(
                "{} evicted in round {} ({}); next: {} round {}",
                evicted,
                round,
                tally.summary(),
                next_phase,
                next_round
            ),
            Outcome::CompetitionStarted {
                handle,
                kind,
                duration_secs,
            } => format!("{} competition {} started ({}s)", kind, handle, duration_secs),
            Outcome::AnswerRecorded {
                participant,
                result,
            } => {
                let verdict = match result {
                    AnswerOutcome::Correct => "correct",
                    AnswerOutcome::Incorrect => "incorrect",
                    AnswerOutcome::AlreadyScored => "already scored",
                };
                format!("answer from {}: {}", participant, verdict)
            }
            Outcome::CompetitionResolved { result } => {
                let cause = match result.cause {
                    ResolutionCause::Deadline => "deadline",
                    ResolutionCause::Cancelled => "ended early",
                };
                match &result.winner {
                    Some(winner) => format!(
                        "{} competition {} over ({}): {} wins +{}",
                        result.kind, result.handle, cause, winner, result.points
                    ),
                    None => format!(
                        "{} competition {} over ({}): no winner",
                        result.kind, result.handle, cause
                    ),
                }
            }
            Outcome::PowerUsed { revoked } => format!(
                "{} used their power: vote for {} revoked",
                revoked.voter, revoked.target
            ),
            Outcome::FinaleDeclared { finalists, jury } => format!(
                "finale: finalists {}; jury {}",
                join(finalists),
                join(jury)
            ),
            Outcome::WinnerRevealed { record, tally } => match tally {
                Some(tally) => format!(
                    "season {} winner: {} ({})",
                    record.season_number,
                    record.winner,
                    tally.summary()
                ),
                None => format!(
                    "season {} winner: {} (unopposed)",
                    record.season_number, record.winner
                ),
            },
            Outcome::Scoreboard {
                snapshot,
                participants,
            } => return Self::format_scoreboard(snapshot, participants),
        };
        format!("{} {}", "ok".green().bold(), line)
    }

    /// One line explaining a rejection
    pub fn format_rejection(error: &GameError) -> String {
        format!(
            "{} [{}] {}",
            "rejected".red().bold(),
            error.code().as_str().yellow(),
            error
        )
    }

    /// Explain a line that could not be parsed; unknown commands get the usage
    pub fn format_parse_error(error: &ParseError) -> String {
        let line = format!("{} {}", "error".red().bold(), error);
        match error {
            ParseError::UnknownCommand(_) => format!("{}\n{}", line, USAGE.dimmed()),
            _ => line,
        }
    }

    /// Season status plus standings, highest points first
    pub fn format_scoreboard(snapshot: &SeasonSnapshot, participants: &[Participant]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} season {} | {} | round {}\n",
            "Scoreboard".cyan().bold(),
            snapshot.season_number,
            snapshot.phase.display_name(),
            snapshot.round
        ));

        if let Some(authority) = &snapshot.authority {
            output.push_str(&format!("  head of round: {}\n", authority));
        }
        if let Some(holder) = &snapshot.veto_holder {
            output.push_str(&format!("  veto holder:   {}\n", holder));
        }
        if !snapshot.nominees.is_empty() {
            output.push_str(&format!("  nominees:      {}\n", join(&snapshot.nominees)));
        }
        if let Some(competition) = &snapshot.competition {
            output.push_str(&format!(
                "  competition:   {} {}\n",
                competition.kind, competition.handle
            ));
        }
        if !snapshot.jury.is_empty() {
            output.push_str(&format!("  jury:          {}\n", join(&snapshot.jury)));
        }

        if participants.is_empty() {
            output.push_str("  (no players registered)");
            return output;
        }

        for (rank, p) in participants.iter().enumerate() {
            let name = if p.flags.eliminated {
                p.display_name.dimmed().to_string()
            } else {
                p.display_name.bold().to_string()
            };
            output.push_str(&format!(
                "  {:>2}. {} ({}) pts {} | hoh {} | veto {}{}\n",
                rank + 1,
                name,
                p.id,
                p.counters.points,
                p.counters.round_wins,
                p.counters.veto_wins,
                if p.flags.eliminated { " | evicted" } else { "" }
            ));
        }
        output.trim_end().to_string()
    }

    /// Format an outcome as a JSON line
    pub fn format_outcome_json(outcome: &Outcome) -> String {
        let mut value = serde_json::to_value(outcome).unwrap_or_else(|_| json!({}));
        if let Some(map) = value.as_object_mut() {
            map.insert("ok".to_string(), json!(true));
        }
        value.to_string()
    }

    /// Format a parse error as a JSON line
    pub fn format_parse_error_json(error: &ParseError) -> String {
        json!({
            "ok": false,
            "code": "parse_error",
            "message": error.to_string(),
        })
        .to_string()
    }

    /// Format a rejection as a JSON line
    pub fn format_rejection_json(error: &GameError) -> String {
        json!({
            "ok": false,
            "code": error.code(),
            "phase": error.phase(),
            "message": error.to_string(),
        })
        .to_string()
    }
}

fn join(ids: &[ParticipantId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use showrunner_domain::Phase;

    fn pid(s: &str) -> ParticipantId {
        ParticipantId::new(s)
    }

    #[test]
    fn test_outcome_is_one_line() {
        colored::control::set_override(false);
        let line = ConsoleFormatter::format_outcome(&Outcome::Nominated {
            target: pid("p3"),
            nominees: vec![pid("p2"), pid("p3")],
            phase: Phase::Veto,
        });
        assert_eq!(line, "ok nominated p3 (nominees: p2, p3; now VETO)");
    }

    #[test]
    fn test_rejection_carries_code_and_phase() {
        colored::control::set_override(false);
        let err = GameError::NoVotesCast {
            phase: Phase::Voting,
            round: 2,
        };
        let line = ConsoleFormatter::format_rejection(&err);
        assert!(line.starts_with("rejected [no_votes_cast]"));
        assert!(line.contains("VOTING"));

        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_rejection_json(&err)).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["code"], "no_votes_cast");
        assert_eq!(value["phase"], "VOTING");
    }

    #[test]
    fn test_unknown_command_prints_usage() {
        colored::control::set_override(false);
        let text =
            ConsoleFormatter::format_parse_error(&ParseError::UnknownCommand("dance".into()));
        assert!(text.starts_with("error unknown command `!dance`"));
        assert!(text.contains("!start_season"));

        let text = ConsoleFormatter::format_parse_error(&ParseError::Malformed);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let json = ConsoleFormatter::format_outcome_json(&Outcome::DoubleEvictionScheduled {
            round: 3,
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["outcome"], "double_eviction_scheduled");
        assert_eq!(value["round"], 3);
    }

    #[test]
    fn test_scoreboard_lists_players_in_order() {
        colored::control::set_override(false);
        let mut alice = Participant::new("alice", "Alice");
        alice.counters.points = 5;
        let mut bob = Participant::new("bob", "Bob");
        bob.flags.eliminated = true;

        let snapshot = SeasonSnapshot {
            season_number: 2,
            phase: Phase::Nomination,
            round: 3,
            authority: Some(pid("alice")),
            ..Default::default()
        };
        let board = ConsoleFormatter::format_scoreboard(&snapshot, &[alice, bob]);
        let lines: Vec<&str> = board.lines().collect();
        assert!(lines[0].contains("season 2"));
        assert!(lines[1].contains("head of round: alice"));
        assert!(lines[2].contains("1. Alice (alice) pts 5"));
        assert!(lines[3].ends_with("| evicted"));
    }
}
