//! Parser from tokens to typed path segments.

use super::tokenize::{Token, tokenize};
use super::{Command, Segment};
use crate::error::{ParseError, Result};

/// Parse SVG path data into segments.
///
/// - An unrecognized character makes the tokenizer bail out, which parses
///   to an empty segment list (`Ok(vec![])`), not an error.
/// - Data that doesn't start with a move gets a synthetic `M 0 0`.
/// - Extra coordinate pairs after a move are implicit line-tos
///   (`M 0 0 10 10` == `M 0 0 L 10 10`, same for `m`/`l`).
///
/// Errors abort the whole parse; no partial list is returned.
pub fn parse_path(d: &str) -> Result<Vec<Segment>> {
    let tokens = tokenize(d);
    if tokens.is_empty() {
        log::debug!("path data produced no tokens, nothing to draw");
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();

    // ## Rust Lesson #25: Explicit State
    //
    // The "current command" carries over between tokens: numbers that
    // follow a complete command are another round of that command.
    // Keeping it in a plain variable makes the state machine visible.
    let mut mode = match tokens[0] {
        Token::Command('M' | 'm') => None,
        _ => {
            segments.push(Segment::move_to(0.0, 0.0));
            Some((Command::Move, false))
        }
    };

    let mut pos = 0;
    while pos < tokens.len() {
        if let Token::Command(letter) = tokens[pos] {
            // The tokenizer only emits known command letters
            mode = Command::from_letter(letter);
            pos += 1;
        }

        let Some((command, relative)) = mode else {
            // Unreachable: the first token is either a move or we seeded a mode
            break;
        };
        let arity = command.arity();
        let remaining = tokens.len() - pos;

        if arity == 0 {
            if let Some(&Token::Number(value)) = tokens.get(pos) {
                return Err(ParseError::UnexpectedNumber {
                    command: command.letter(relative),
                    value,
                });
            }
        } else if remaining < arity {
            return Err(ParseError::UnexpectedEnd {
                command: command.letter(relative),
                expected: arity,
                found: remaining,
            });
        }

        let mut params = Vec::with_capacity(arity);
        for (index, token) in tokens[pos..pos + arity].iter().enumerate() {
            match *token {
                Token::Number(value) => params.push(value),
                Token::Command(found) => {
                    return Err(ParseError::NotANumber {
                        command: command.letter(relative),
                        index,
                        found,
                    });
                }
            }
        }
        pos += arity;

        segments.push(Segment::new(command, relative, params)?);

        if command == Command::Move {
            mode = Some((Command::Line, relative));
        }
    }

    log::trace!("parsed {} segments from {} tokens", segments.len(), tokens.len());
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(segments: &[Segment]) -> String {
        segments.iter().map(Segment::letter).collect()
    }

    #[test]
    fn simple_closed_path() {
        let segments = parse_path("M0 0L10 0L10 10L0 10Z").unwrap();
        assert_eq!(letters(&segments), "MLLLZ");
        assert_eq!(segments[2].params(), &[10.0, 10.0]);
    }

    #[test]
    fn implicit_line_after_move() {
        let segments = parse_path("M 0 0 10 10 20 0").unwrap();
        assert_eq!(letters(&segments), "MLL");

        let segments = parse_path("m 1 1 2 2").unwrap();
        assert_eq!(letters(&segments), "ml");
    }

    #[test]
    fn repeated_commands_without_letters() {
        let segments = parse_path("M0 0 C 1 1 2 2 3 3 4 4 5 5 6 6").unwrap();
        assert_eq!(letters(&segments), "MCC");
        assert_eq!(segments[2].params(), &[4.0, 4.0, 5.0, 5.0, 6.0, 6.0]);
    }

    #[test]
    fn synthetic_move_when_missing() {
        let segments = parse_path("L 10 10").unwrap();
        assert_eq!(letters(&segments), "ML");
        assert_eq!(segments[0].params(), &[0.0, 0.0]);

        // Leading numbers run in move mode, then switch to line
        let segments = parse_path("5 5 6 6").unwrap();
        assert_eq!(letters(&segments), "MML");
    }

    #[test]
    fn arc_parameters() {
        let segments = parse_path("M 0 0 A 5 5 0 1 0 10 0").unwrap();
        assert_eq!(segments[1].command, Command::Arc);
        assert_eq!(segments[1].params(), &[5.0, 5.0, 0.0, 1.0, 0.0, 10.0, 0.0]);
    }

    #[test]
    fn unrecognized_character_is_not_an_error() {
        assert_eq!(parse_path("M 0 0 # 10 10"), Ok(vec![]));
        assert_eq!(parse_path(""), Ok(vec![]));
    }

    #[test]
    fn short_data_is_an_error() {
        assert_eq!(
            parse_path("M 0 0 L 10"),
            Err(ParseError::UnexpectedEnd { command: 'L', expected: 2, found: 1 })
        );
    }

    #[test]
    fn command_in_parameter_position_is_an_error() {
        assert_eq!(
            parse_path("M 0 0 C 1 2 L 3 4 5 6"),
            Err(ParseError::NotANumber { command: 'C', index: 2, found: 'L' })
        );
    }

    #[test]
    fn number_after_close_is_an_error() {
        assert_eq!(
            parse_path("M 0 0 L 1 1 Z 5 5"),
            Err(ParseError::UnexpectedNumber { command: 'Z', value: 5.0 })
        );
    }

    #[test]
    fn consecutive_closes() {
        let segments = parse_path("M 0 0 L 1 1 Z z").unwrap();
        assert_eq!(letters(&segments), "MLZz");
    }
}
