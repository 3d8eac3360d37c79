//! Command stream parser
//!
//! Reads the text produced by the serializer (or written by hand) back into
//! [`Command`]s. Blank lines and lines starting with `#` are skipped.

use std::str::FromStr;

use super::ast::{Command, CommandAction};
use crate::eventbuffer::analog::is_valid_analog;
use crate::eventbuffer::names::Action;

/// Parse errors, each tagged with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    /// Line does not have the `<time> <command> <argument>` shape
    #[error("line {line}: expected `<time> <command> <argument>`, got \"{text}\"")]
    Malformed { line: usize, text: String },

    /// Timestamp is neither milliseconds nor decimal notation
    #[error("line {line}: invalid time \"{text}\"")]
    InvalidTime { line: usize, text: String },

    /// Command keyword is not press/rel/gas/steer
    #[error("line {line}: unknown command \"{text}\"")]
    UnknownCommand { line: usize, text: String },

    /// press/rel argument is not a known action
    #[error("line {line}: unknown action \"{text}\"")]
    UnknownAction { line: usize, text: String },

    /// gas/steer argument is not an integer in [-65536, 65536]
    #[error("line {line}: invalid analog value \"{text}\"")]
    InvalidValue { line: usize, text: String },
}

/// Parse a whole command stream
pub fn parse_commands(text: &str) -> Result<Vec<Command>, CommandParseError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| parse_line(line_no, line))
        .collect()
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(1, s.trim())
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Command, CommandParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let &[time, verb, argument] = tokens.as_slice() else {
        return Err(CommandParseError::Malformed {
            line: line_no,
            text: line.to_string(),
        });
    };

    let time = parse_time(time).ok_or_else(|| CommandParseError::InvalidTime {
        line: line_no,
        text: time.to_string(),
    })?;

    let action = match verb {
        "press" | "rel" => {
            let action =
                Action::from_keyword(argument).ok_or_else(|| CommandParseError::UnknownAction {
                    line: line_no,
                    text: argument.to_string(),
                })?;
            if verb == "press" {
                CommandAction::Press(action)
            } else {
                CommandAction::Release(action)
            }
        }
        "gas" | "steer" => {
            let value = argument
                .parse::<i32>()
                .ok()
                .filter(|v| is_valid_analog(*v))
                .ok_or_else(|| CommandParseError::InvalidValue {
                    line: line_no,
                    text: argument.to_string(),
                })?;
            if verb == "gas" {
                CommandAction::Gas(value)
            } else {
                CommandAction::Steer(value)
            }
        }
        _ => {
            return Err(CommandParseError::UnknownCommand {
                line: line_no,
                text: verb.to_string(),
            });
        }
    };

    Ok(Command::new(time, action))
}

/// Parse a timestamp in milliseconds (`12340`) or decimal notation
/// (`12.34`, `1:2.5`, `1:0:0.0`)
///
/// Minutes and seconds must be below 60 when a larger unit precedes them.
pub fn parse_time(s: &str) -> Option<i64> {
    if !s.contains([':', '.']) {
        return match s.strip_prefix('-') {
            Some(digits) => parse_digits(digits).map(|ms| -ms),
            None => parse_digits(s),
        };
    }

    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let (clock, seconds) = parts.split_at(parts.len() - 1);

    let (whole, fraction) = match seconds[0].split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (seconds[0], ""),
    };

    // Leading field is unbounded, later ones are sexagesimal
    let mut fields = clock.iter().copied().chain([whole]);
    let mut total = parse_digits(fields.next()?)?;
    for field in fields {
        let value = parse_digits(field)?;
        if value >= 60 {
            return None;
        }
        total = total.checked_mul(60)?.checked_add(value)?;
    }

    let centis = match fraction.len() {
        0 => 0,
        1 => parse_digits(fraction)? * 10,
        2 => parse_digits(fraction)?,
        _ => return None,
    };

    total.checked_mul(100)?.checked_add(centis)?.checked_mul(10)
}

fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eventbuffer::script::ast::{TimeNotation, format_time};

    #[test]
    fn test_parse_basic_stream() {
        let commands = parse_commands(
            "0 press up\n10 steer -65536\n20 gas 30000\n30 rel up\n",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::new(0, CommandAction::Press(Action::Accelerate)),
                Command::new(10, CommandAction::Steer(-65536)),
                Command::new(20, CommandAction::Gas(30000)),
                Command::new(30, CommandAction::Release(Action::Accelerate)),
            ]
        );
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let commands = parse_commands("# sd output\n\n  \n-10 press enter\n").unwrap();
        assert_eq!(
            commands,
            vec![Command::new(-10, CommandAction::Press(Action::Respawn))]
        );
    }

    #[test]
    fn test_from_str() {
        let cmd: Command = "1520 rel left".parse().unwrap();
        assert_eq!(cmd, Command::new(1520, CommandAction::Release(Action::SteerLeft)));
    }

    #[test]
    fn test_decimal_times() {
        assert_eq!(parse_time("12.34"), Some(12_340));
        assert_eq!(parse_time("0.05"), Some(50));
        assert_eq!(parse_time("1.5"), Some(1500));
        assert_eq!(parse_time("1:2.34"), Some(62_340));
        assert_eq!(parse_time("1:0:0.0"), Some(3_600_000));
        assert_eq!(parse_time("7"), Some(7));
        assert_eq!(parse_time("-30"), Some(-30));
        assert_eq!(parse_time("1:2"), Some(62_000));
    }

    #[test]
    fn test_invalid_times() {
        assert_eq!(parse_time("abc"), None);
        assert_eq!(parse_time("1.234"), None);
        assert_eq!(parse_time("1:2:3:4.0"), None);
        assert_eq!(parse_time(".5"), None);
        assert_eq!(parse_time("-1.5"), None);
    }

    #[test]
    fn test_clock_fields_below_sixty() {
        assert_eq!(parse_time("1:59.0"), Some(119_000));
        assert_eq!(parse_time("1:60.0"), None);
        assert_eq!(parse_time("1:75.0"), None);
        assert_eq!(parse_time("1:60:0.0"), None);
        assert_eq!(parse_time("75.0"), Some(75_000));
        assert_eq!(parse_time("90:0.0"), Some(5_400_000));
    }

    #[test]
    fn test_sign_prefix() {
        assert_eq!(parse_time("+5"), None);
        assert_eq!(parse_time("-"), None);
        assert_eq!(parse_time("--5"), None);
    }

    #[test]
    fn test_overflowing_time_is_invalid() {
        assert_eq!(parse_time("9223372036854775:0.0"), None);
        assert_eq!(parse_time("92233720368547758.0"), None);
        assert_eq!(parse_time("99999999999999999999"), None);
        assert_eq!(
            parse_commands("9223372036854775:0.0 steer 0"),
            Err(CommandParseError::InvalidTime {
                line: 1,
                text: "9223372036854775:0.0".to_string(),
            })
        );
        assert!(matches!(
            parse_commands("0 steer 0\n92233720368547758.0 steer 0"),
            Err(CommandParseError::InvalidTime { line: 2, .. })
        ));
    }

    #[test]
    fn test_decimal_format_parses_back() {
        for ms in [0, 50, 1500, 12_340, 62_340, 600_000, 3_723_450] {
            let text = format_time(ms, TimeNotation::Decimal);
            assert_eq!(parse_time(&text), Some(ms), "{}", text);
        }
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_commands("0 press up\n10 press jump\n"),
            Err(CommandParseError::UnknownAction {
                line: 2,
                text: "jump".to_string(),
            })
        );
        assert_eq!(
            parse_commands("0 honk up"),
            Err(CommandParseError::UnknownCommand {
                line: 1,
                text: "honk".to_string(),
            })
        );
        assert_eq!(
            parse_commands("\n\nsoon steer 0"),
            Err(CommandParseError::InvalidTime {
                line: 3,
                text: "soon".to_string(),
            })
        );
        assert!(matches!(
            parse_commands("0 steer"),
            Err(CommandParseError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_range_analog() {
        assert_eq!(
            parse_commands("0 steer 70000"),
            Err(CommandParseError::InvalidValue {
                line: 1,
                text: "70000".to_string(),
            })
        );
        assert!(parse_commands("0 gas full").is_err());
    }
}
