// src/opts.rs

//! Low-level option table: the "register named options, parse, get back
//! unmatched tokens" primitive the binder is built on.
//!
//! Tokens are recognised in `-x` and `--xxx` forms interchangeably.
//! Presence-style options accept a bare flag plus explicit `+` / `-`
//! suffixes (`-b`, `-b+` both mean true, `-b-` means false). Value-style
//! options take `name=value`, `name:value`, or consume the following
//! token. Anything the table does not recognise is returned untouched in
//! input order, so several tables can each take a pass over one shared
//! argument list.

use std::fmt::Write as _;

/// How an option consumes input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OptStyle {
    /// Bare flag, optionally suffixed `+` or `-`.
    Presence,
    /// Requires a value, attached or as the next token.
    Value,
}

/// One registered option. `tag` is a caller-chosen identifier reported
/// back on every match (the binder uses parameter indices).
#[derive(Debug, Clone)]
pub(crate) struct OptDef {
    pub tag: usize,
    pub names: Vec<String>,
    pub style: OptStyle,
    pub description: Option<String>,
    pub hidden: bool,
}

impl OptDef {
    pub fn presence(tag: usize, names: &[&str]) -> Self {
        Self::new(tag, names, OptStyle::Presence)
    }

    pub fn value(tag: usize, names: &[&str]) -> Self {
        Self::new(tag, names, OptStyle::Value)
    }

    fn new(tag: usize, names: &[&str], style: OptStyle) -> Self {
        Self {
            tag,
            names: names.iter().map(|n| n.to_string()).collect(),
            style,
            description: None,
            hidden: false,
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Exclude the option from rendered descriptions.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// The raw payload of one matched option.
#[derive(Debug, Clone)]
pub(crate) enum RawValue {
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct OptMatch {
    pub tag: usize,
    pub value: RawValue,
}

/// Result of one parsing pass: matches in input order, plus every token
/// the table did not claim.
#[derive(Debug, Default)]
pub(crate) struct ParseOutcome {
    pub matches: Vec<OptMatch>,
    pub residual: Vec<String>,
}

/// Parsing failure local to one option table; the binder attaches the
/// owning task's name before surfacing it.
#[derive(Debug)]
pub(crate) enum OptParseError {
    MissingValue { option: String },
}

#[derive(Debug, Default)]
pub(crate) struct OptionSet {
    opts: Vec<OptDef>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, def: OptDef) -> &mut Self {
        self.opts.push(def);
        self
    }

    fn lookup(&self, name: &str) -> Option<&OptDef> {
        self.opts
            .iter()
            .find(|def| def.names.iter().any(|n| n == name))
    }

    /// Take one pass over `args`, matching what this table knows about.
    pub fn parse(&self, args: &[String]) -> Result<ParseOutcome, OptParseError> {
        let mut outcome = ParseOutcome::default();
        let mut i = 0;
        while i < args.len() {
            let token = &args[i];
            i += 1;

            let Some(body) = option_body(token) else {
                outcome.residual.push(token.clone());
                continue;
            };

            let (name, attached) = match body.find(['=', ':']) {
                Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
                None => (body, None),
            };

            if let Some(def) = self.lookup(name) {
                match (def.style, attached) {
                    (OptStyle::Presence, None) => {
                        outcome.matches.push(OptMatch {
                            tag: def.tag,
                            value: RawValue::Flag(true),
                        });
                    }
                    // A presence option with an attached value is not a
                    // form this option accepts; leave the token unmatched.
                    (OptStyle::Presence, Some(_)) => outcome.residual.push(token.clone()),
                    (OptStyle::Value, attached) => {
                        let raw = match attached {
                            Some(v) => v.to_string(),
                            None if i < args.len() => {
                                let v = args[i].clone();
                                i += 1;
                                v
                            }
                            None => {
                                return Err(OptParseError::MissingValue {
                                    option: format_option(name),
                                });
                            }
                        };
                        outcome.matches.push(OptMatch {
                            tag: def.tag,
                            value: RawValue::Text(raw),
                        });
                    }
                }
                continue;
            }

            // `-b+` / `-b-` forms for presence options.
            if attached.is_none() {
                if let Some(stripped) = name.strip_suffix(['+', '-']) {
                    if let Some(def) = self.lookup(stripped) {
                        if def.style == OptStyle::Presence {
                            outcome.matches.push(OptMatch {
                                tag: def.tag,
                                value: RawValue::Flag(name.ends_with('+')),
                            });
                            continue;
                        }
                    }
                }
            }

            outcome.residual.push(token.clone());
        }
        Ok(outcome)
    }

    /// Render the visible options, one per line, for help output.
    pub fn render_descriptions(&self) -> String {
        let mut out = String::new();
        for def in self.opts.iter().filter(|d| !d.hidden) {
            let mut flags = def
                .names
                .iter()
                .map(|n| format_option(n))
                .collect::<Vec<_>>()
                .join(", ");
            if def.style == OptStyle::Value {
                flags.push_str("=VALUE");
            }
            let _ = writeln!(
                out,
                "  {:<26} {}",
                flags,
                def.description.as_deref().unwrap_or("")
            );
        }
        out
    }
}

/// Single-character names format as `-x`, longer names as `--xxx`.
pub(crate) fn format_option(name: &str) -> String {
    if name.chars().count() == 1 {
        format!("-{name}")
    } else {
        format!("--{name}")
    }
}

/// Whether a token is option-like, and if so its body with the `-` or
/// `--` prefix removed. Bare `-` and `--` are plain tokens.
pub(crate) fn option_body(token: &str) -> Option<&str> {
    if token == "-" || token == "--" {
        return None;
    }
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
}
