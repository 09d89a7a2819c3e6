//! Remote transform commands
//!
//! A command arrives as one text line (`rotate 30 cw`, `scale 1.5 2`,
//! `color #ff8800`, `tool polygon`) or as a JSON object tagged by `cmd`
//! (`{"cmd": "rotate", "degrees": 30, "direction": "clockwise"}`).

use crate::display::{Color, ParseColorError};
use crate::raster::LineAlgorithm;
use crate::scene::PrimitiveKind;
use crate::transform::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    Arguments {
        command: &'static str,
        expected: &'static str,
    },

    #[error("invalid argument '{value}' for '{command}': {reason}")]
    Value {
        command: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid JSON command: {0}")]
    Json(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
    Rotate {
        degrees: f64,
        #[serde(default)]
        direction: Direction,
    },
    Scale {
        sx: f64,
        sy: f64,
    },
    Shear {
        factor: f64,
    },
    /// Reflect over edge `edge` of the committed polygon
    Reflect {
        #[serde(default)]
        edge: usize,
    },
    Color {
        color: Color,
    },
    Algorithm {
        algorithm: LineAlgorithm,
    },
    /// Arm a construction tool, or disarm with `None`
    Tool {
        kind: Option<PrimitiveKind>,
    },
    Clear,
}

impl Command {
    /// Parse a text or JSON command line
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        if line.starts_with('{') {
            return serde_json::from_str(line).map_err(|e| ParseError::Json(e.to_string()));
        }

        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match head.to_lowercase().as_str() {
            "rotate" | "rot" => {
                let (degrees, direction) = match args.as_slice() {
                    [deg] => (*deg, Direction::CounterClockwise),
                    [deg, dir] => (*deg, parse_direction(dir)?),
                    _ => {
                        return Err(ParseError::Arguments {
                            command: "rotate",
                            expected: "DEGREES [cw|ccw]",
                        })
                    },
                };
                Ok(Self::Rotate {
                    degrees: parse_number("rotate", degrees)?,
                    direction,
                })
            },
            "scale" => match args.as_slice() {
                [s] => {
                    let s = parse_number("scale", s)?;
                    Ok(Self::Scale { sx: s, sy: s })
                },
                [sx, sy] => Ok(Self::Scale {
                    sx: parse_number("scale", sx)?,
                    sy: parse_number("scale", sy)?,
                }),
                _ => Err(ParseError::Arguments {
                    command: "scale",
                    expected: "FACTOR or SX SY",
                }),
            },
            "shear" => match args.as_slice() {
                [k] => Ok(Self::Shear {
                    factor: parse_number("shear", k)?,
                }),
                _ => Err(ParseError::Arguments {
                    command: "shear",
                    expected: "FACTOR",
                }),
            },
            "reflect" | "mirror" => match args.as_slice() {
                [] => Ok(Self::Reflect { edge: 0 }),
                [edge] => Ok(Self::Reflect {
                    edge: edge.parse().map_err(|e: std::num::ParseIntError| ParseError::Value {
                        command: "reflect",
                        value: (*edge).to_string(),
                        reason: e.to_string(),
                    })?,
                }),
                _ => Err(ParseError::Arguments {
                    command: "reflect",
                    expected: "[EDGE]",
                }),
            },
            "color" | "colour" => match args.as_slice() {
                [c] => {
                    let color = c.parse().map_err(|e: ParseColorError| ParseError::Value {
                        command: "color",
                        value: (*c).to_string(),
                        reason: e.to_string(),
                    })?;
                    Ok(Self::Color { color })
                },
                _ => Err(ParseError::Arguments {
                    command: "color",
                    expected: "#RRGGBB",
                }),
            },
            "algorithm" | "algo" => match args.as_slice() {
                [a] => Ok(Self::Algorithm {
                    algorithm: a.parse().map_err(|reason| ParseError::Value {
                        command: "algorithm",
                        value: (*a).to_string(),
                        reason,
                    })?,
                }),
                _ => Err(ParseError::Arguments {
                    command: "algorithm",
                    expected: "dda|bresenham",
                }),
            },
            "tool" => match args.as_slice() {
                [] | ["none"] => Ok(Self::Tool { kind: None }),
                [k] => Ok(Self::Tool {
                    kind: Some(k.parse().map_err(|reason| ParseError::Value {
                        command: "tool",
                        value: (*k).to_string(),
                        reason,
                    })?),
                }),
                _ => Err(ParseError::Arguments {
                    command: "tool",
                    expected: "KIND|none",
                }),
            },
            "clear" | "reset" => Ok(Self::Clear),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

fn parse_number(command: &'static str, value: &str) -> Result<f64, ParseError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::Value {
            command,
            value: value.to_string(),
            reason: "not a finite number".to_string(),
        })
}

fn parse_direction(value: &str) -> Result<Direction, ParseError> {
    match value.to_lowercase().as_str() {
        "cw" | "clockwise" => Ok(Direction::Clockwise),
        "ccw" | "counterclockwise" => Ok(Direction::CounterClockwise),
        _ => Err(ParseError::Value {
            command: "rotate",
            value: value.to_string(),
            reason: "expected cw or ccw".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_commands() {
        assert_eq!(
            Command::parse("rotate 30 cw"),
            Ok(Command::Rotate {
                degrees: 30.0,
                direction: Direction::Clockwise
            })
        );
        assert_eq!(
            Command::parse("  ROTATE -12.5 "),
            Ok(Command::Rotate {
                degrees: -12.5,
                direction: Direction::CounterClockwise
            })
        );
        assert_eq!(Command::parse("scale 1.5"), Ok(Command::Scale { sx: 1.5, sy: 1.5 }));
        assert_eq!(Command::parse("scale 1.5 2"), Ok(Command::Scale { sx: 1.5, sy: 2.0 }));
        assert_eq!(Command::parse("shear 0.2"), Ok(Command::Shear { factor: 0.2 }));
        assert_eq!(Command::parse("reflect"), Ok(Command::Reflect { edge: 0 }));
        assert_eq!(Command::parse("reflect 3"), Ok(Command::Reflect { edge: 3 }));
        assert_eq!(
            Command::parse("color #ff8800"),
            Ok(Command::Color {
                color: Color::rgb(0xff, 0x88, 0x00)
            })
        );
        assert_eq!(
            Command::parse("algorithm bresenham"),
            Ok(Command::Algorithm {
                algorithm: LineAlgorithm::Bresenham
            })
        );
        assert_eq!(
            Command::parse("tool polygon"),
            Ok(Command::Tool {
                kind: Some(PrimitiveKind::Polygon)
            })
        );
        assert_eq!(Command::parse("tool none"), Ok(Command::Tool { kind: None }));
        assert_eq!(Command::parse("clear"), Ok(Command::Clear));
    }

    #[test]
    fn test_parse_json_commands() {
        assert_eq!(
            Command::parse(r#"{"cmd": "rotate", "degrees": 90, "direction": "cw"}"#),
            Ok(Command::Rotate {
                degrees: 90.0,
                direction: Direction::Clockwise
            })
        );
        assert_eq!(
            Command::parse(r#"{"cmd": "tool", "kind": "coons"}"#),
            Ok(Command::Tool {
                kind: Some(PrimitiveKind::Coons)
            })
        );
        assert_eq!(Command::parse(r#"{"cmd": "clear"}"#), Ok(Command::Clear));
        assert!(matches!(Command::parse(r#"{"cmd": "explode"}"#), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(Command::parse("spin 4"), Err(ParseError::Unknown("spin".to_string())));
        assert!(matches!(
            Command::parse("scale"),
            Err(ParseError::Arguments { command: "scale", .. })
        ));
        assert!(matches!(
            Command::parse("scale x"),
            Err(ParseError::Value { command: "scale", .. })
        ));
        assert!(matches!(Command::parse("scale NaN"), Err(ParseError::Value { .. })));
        assert!(matches!(Command::parse("rotate 10 up"), Err(ParseError::Value { .. })));
        assert!(matches!(Command::parse("color blue"), Err(ParseError::Value { .. })));
    }
}
