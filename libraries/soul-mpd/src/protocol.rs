//! MPD text protocol: command encoding and response parsing.
//!
//! A response is a run of `key: value` lines ended by `OK`, or a single
//! `ACK [code@index] {command} message` line.

use crate::error::{MpdError, Result};
use soul_core::{PlayState, PlayerStatus, RawTrackAttrs};

/// First line the server sends on connect
pub const GREETING_PREFIX: &str = "OK MPD ";

/// Keys that start a new entry in `listallinfo` output
const ENTRY_KEYS: [&str; 3] = ["file", "directory", "playlist"];

/// Response body: `key: value` pairs in server order
pub type Pairs = Vec<(String, String)>;

/// One line of a response
#[derive(Debug)]
pub enum Line {
    Pair(String, String),
    Ok,
    Ack(MpdError),
}

/// Quote an argument, escaping backslashes and double quotes
pub fn quote(arg: &str) -> String {
    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Build a command line (without the trailing newline)
pub fn command(name: &str, args: &[&str]) -> String {
    let mut line = name.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&quote(arg));
    }
    line
}

/// Parse one response line (without the trailing newline)
pub fn parse_line(line: &str) -> Result<Line> {
    if line == "OK" {
        return Ok(Line::Ok);
    }
    if let Some(rest) = line.strip_prefix("ACK ") {
        return Ok(Line::Ack(parse_ack(rest)));
    }
    line.split_once(": ")
        .map(|(k, v)| Line::Pair(k.to_string(), v.to_string()))
        .ok_or_else(|| MpdError::Protocol(format!("Unexpected line: {line}")))
}

/// Parse the part after `ACK `: `[code@index] {command} message`
fn parse_ack(rest: &str) -> MpdError {
    let parsed = (|| {
        let rest = rest.strip_prefix('[')?;
        let (code, rest) = rest.split_once('@')?;
        let (_, rest) = rest.split_once("] {")?;
        let (command, message) = rest.split_once('}')?;
        Some(MpdError::Ack {
            code: code.parse().ok()?,
            command: command.to_string(),
            message: message.trim_start().to_string(),
        })
    })();

    parsed.unwrap_or_else(|| MpdError::Protocol(format!("Malformed ACK: {rest}")))
}

/// Split `listallinfo` output into song entries
///
/// Directory and playlist entries are kept (without a `file` key) so the
/// caller can decide what to skip.
pub fn entries(pairs: Pairs) -> Vec<RawTrackAttrs> {
    let mut entries = Vec::new();
    let mut current: Option<RawTrackAttrs> = None;

    for (key, value) in pairs {
        if ENTRY_KEYS.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
            entries.extend(current.take());
        }
        current.get_or_insert_with(RawTrackAttrs::new).insert(key, value);
    }
    entries.extend(current);
    entries
}

/// Parse `currentsong` output; empty means nothing is selected
pub fn current_song(pairs: Pairs) -> Option<RawTrackAttrs> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.into_iter().collect())
}

/// Parse `status` output
///
/// A volume of `-1` means the server has no mixer.
pub fn status(pairs: &Pairs) -> Result<PlayerStatus> {
    let mut status = PlayerStatus::default();

    for (key, value) in pairs {
        match key.as_str() {
            "volume" => {
                let volume: i32 = parse_number(key, value)?;
                status.volume = u8::try_from(volume).ok();
            }
            "state" => {
                status.state = PlayState::from_str(value)
                    .ok_or_else(|| MpdError::Protocol(format!("Unknown state: {value}")))?;
            }
            "songid" => status.song_id = Some(parse_number(key, value)?),
            "playlistlength" => status.queue_length = parse_number(key, value)?,
            _ => {}
        }
    }

    Ok(status)
}

/// Extract the queue id from `addid` output
pub fn added_id(pairs: &Pairs) -> Result<u32> {
    let (key, value) = pairs
        .iter()
        .find(|(k, _)| k == "Id")
        .ok_or_else(|| MpdError::Protocol("addid returned no Id".to_string()))?;
    parse_number(key, value)
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| MpdError::Protocol(format!("Invalid {key}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(lines: &[(&str, &str)]) -> Pairs {
        lines
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn quoting() {
        assert_eq!(quote("plain"), "\"plain\"");
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote("C:\\music"), "\"C:\\\\music\"");
        assert_eq!(
            command("addid", &["lofi/Lo-Fi Beats.flac"]),
            "addid \"lofi/Lo-Fi Beats.flac\""
        );
        assert_eq!(command("next", &[]), "next");
    }

    #[test]
    fn response_lines() {
        assert!(matches!(parse_line("OK").unwrap(), Line::Ok));
        let Line::Pair(key, value) = parse_line("Title: So What: Live").unwrap() else {
            panic!("expected pair");
        };
        assert_eq!((key.as_str(), value.as_str()), ("Title", "So What: Live"));
        assert!(parse_line("garbage").is_err());
    }

    #[test]
    fn ack_lines() {
        let Line::Ack(MpdError::Ack {
            code,
            command,
            message,
        }) = parse_line("ACK [50@0] {addid} No such directory").unwrap()
        else {
            panic!("expected ACK");
        };
        assert_eq!(code, 50);
        assert_eq!(command, "addid");
        assert_eq!(message, "No such directory");

        assert!(matches!(
            parse_line("ACK nonsense").unwrap(),
            Line::Ack(MpdError::Protocol(_))
        ));
    }

    #[test]
    fn listallinfo_entries() {
        let out = entries(pairs(&[
            ("directory", "jazz"),
            ("Last-Modified", "2024-01-01T00:00:00Z"),
            ("file", "jazz/so_what.flac"),
            ("Title", "So What"),
            ("Artist", "Miles Davis"),
            ("Artist", "John Coltrane"),
            ("file", "jazz/untitled.flac"),
        ]));

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].file(), None);
        assert_eq!(out[1].title(), Some("So What"));
        assert_eq!(out[1].get("artist"), Some("Miles Davis"));
        assert_eq!(out[2].file(), Some("jazz/untitled.flac"));
        assert_eq!(out[2].title(), None);
    }

    #[test]
    fn status_parsing() {
        let parsed = status(&pairs(&[
            ("volume", "42"),
            ("state", "play"),
            ("songid", "7"),
            ("playlistlength", "3"),
            ("bitrate", "320"),
        ]))
        .unwrap();
        assert_eq!(parsed.volume, Some(42));
        assert!(parsed.is_playing());
        assert_eq!(parsed.song_id, Some(7));
        assert_eq!(parsed.queue_length, 3);

        let no_mixer = status(&pairs(&[("volume", "-1"), ("state", "stop")])).unwrap();
        assert_eq!(no_mixer.volume, None);

        assert!(status(&pairs(&[("volume", "loud")])).is_err());
    }

    #[test]
    fn addid_response() {
        assert_eq!(added_id(&pairs(&[("Id", "12")])).unwrap(), 12);
        assert!(added_id(&pairs(&[])).is_err());
    }

    #[test]
    fn empty_currentsong() {
        assert!(current_song(Vec::new()).is_none());
        let song = current_song(pairs(&[("file", "a.flac"), ("Title", "A")])).unwrap();
        assert_eq!(song.title(), Some("A"));
    }
}
