//! Session tuning.
//!
//! Defaults match a relaxed voice game: one tick per second and two seconds
//! for the surface to confirm a castle. Options can also be changed at run
//! time with `setoption name <Name> value <Value>`.

use std::time::Duration;

use crate::errors::BlindChessErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    pub castling_timeout: Duration,
    /// Board polls the simulated opponent waits before replying.
    pub opponent_reply_polls: u32,
    /// Fixed seed for the simulated opponent; random when `None`.
    pub opponent_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            castling_timeout: Duration::from_secs(2),
            opponent_reply_polls: 1,
            opponent_seed: None,
        }
    }
}

impl SessionConfig {
    /// Apply one named option. Names are case-insensitive.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), BlindChessErrors> {
        let invalid = || BlindChessErrors::InvalidOption(format!("invalid {name} value '{value}'"));

        if name.eq_ignore_ascii_case("TickMs") {
            let ms = value.parse::<u64>().map_err(|_| invalid())?;
            self.tick_interval = Duration::from_millis(ms.max(1));
        } else if name.eq_ignore_ascii_case("CastlingTimeoutMs") {
            let ms = value.parse::<u64>().map_err(|_| invalid())?;
            self.castling_timeout = Duration::from_millis(ms);
        } else if name.eq_ignore_ascii_case("OpponentReplyPolls") {
            let polls = value.parse::<u32>().map_err(|_| invalid())?;
            self.opponent_reply_polls = polls.max(1);
        } else if name.eq_ignore_ascii_case("Seed") {
            self.opponent_seed = if value.eq_ignore_ascii_case("none") {
                None
            } else {
                Some(value.parse::<u64>().map_err(|_| invalid())?)
            };
        } else {
            return Err(BlindChessErrors::InvalidOption(format!("unknown option '{name}'")));
        }
        Ok(())
    }
}

/// Split `setoption name <N...> value <V...>` into its name and value.
pub fn parse_setoption(line: &str) -> Result<(String, String), BlindChessErrors> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("setoption") {
        return Err(BlindChessErrors::InvalidOption(format!("not a setoption line: {line}")));
    }

    let mut name_tokens = Vec::<&str>::new();
    let mut value_tokens = Vec::<&str>::new();
    let mut mode = "";

    for tok in tokens {
        match tok {
            "name" => mode = "name",
            "value" => mode = "value",
            _ if mode == "name" => name_tokens.push(tok),
            _ if mode == "value" => value_tokens.push(tok),
            _ => {}
        }
    }

    if name_tokens.is_empty() {
        return Err(BlindChessErrors::InvalidOption("setoption without a name".to_owned()));
    }
    Ok((name_tokens.join(" "), value_tokens.join(" ")))
}
