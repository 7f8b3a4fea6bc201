//! Local audio playback for `respondAudio`.
//!
//! Audio is written to a temporary file and handed to an external player in
//! a detached task. The task removes the file when the player exits. Nothing
//! is reported back to the tool call; failures only show up in the logs.

use mcpollinations_common::config::Config;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::Stdio;
use tempfile::TempPath;
use thiserror::Error;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Players tried in order when none is configured.
const DEFAULT_PLAYERS: &[&[&str]] = &[
    &["mpg123", "-q"],
    &["mpg321", "-q"],
    &["mplayer", "-really-quiet"],
    &["afplay"],
    &["play", "-q"],
    &["cvlc", "--play-and-exit"],
    &["ffplay", "-nodisp", "-autoexit", "-loglevel", "quiet"],
    &["aplay", "-q"],
];

/// Errors from running a player.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio player available")]
    NoPlayer,

    #[error("Failed to start {player}: {source}")]
    Spawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{player} exited with {status}")]
    Exit { player: String, status: String },
}

/// Runs an external command to play audio files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPlayer {
    command: Option<Vec<String>>,
    enabled: bool,
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self {
            command: None,
            enabled: true,
        }
    }
}

impl AudioPlayer {
    pub fn from_config(config: &Config) -> Self {
        let command = config
            .audio_player
            .as_deref()
            .map(|cmd| cmd.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty());

        Self {
            command,
            enabled: config.playback_enabled,
        }
    }

    /// A player that never plays anything.
    pub fn disabled() -> Self {
        Self {
            command: None,
            enabled: false,
        }
    }

    /// A player that always uses `command` (program followed by its arguments).
    pub fn with_command<I, S>(command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: Some(command.into_iter().map(Into::into).collect()),
            enabled: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Commands to try, in order. A configured command replaces the defaults.
    pub fn candidates(&self) -> Vec<Vec<String>> {
        match &self.command {
            Some(command) => vec![command.clone()],
            None => DEFAULT_PLAYERS
                .iter()
                .map(|parts| parts.iter().map(|p| p.to_string()).collect())
                .collect(),
        }
    }

    /// Play `path` with the first available candidate and wait for it to exit.
    ///
    /// Candidates whose executable is missing are skipped. Returns the name of
    /// the player that ran.
    pub async fn play_file(&self, path: &Path) -> Result<String, PlaybackError> {
        for candidate in self.candidates() {
            let Some((program, args)) = candidate.split_first() else {
                continue;
            };

            // stdout must stay untouched: it may carry the stdio transport
            let status = Command::new(program)
                .args(args)
                .arg(path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;

            match status {
                Ok(status) if status.success() => return Ok(program.clone()),
                Ok(status) => {
                    return Err(PlaybackError::Exit {
                        player: program.clone(),
                        status: status.to_string(),
                    });
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(player = %program, "Player not installed, trying next");
                }
                Err(e) => {
                    return Err(PlaybackError::Spawn {
                        player: program.clone(),
                        source: e,
                    });
                }
            }
        }

        Err(PlaybackError::NoPlayer)
    }

    /// Write `bytes` to a temporary file and play it in the background.
    ///
    /// Returns `None` when playback is disabled. The file is written on the
    /// blocking pool inside the task; write failures are only logged.
    pub fn spawn(&self, bytes: Vec<u8>, mime_type: &str) -> Option<JoinHandle<()>> {
        if !self.enabled {
            debug!("Audio playback disabled");
            return None;
        }

        let player = self.clone();
        let mime_type = mime_type.to_string();
        Some(tokio::spawn(async move {
            let written = tokio::task::spawn_blocking(move || write_temp(&bytes, &mime_type)).await;
            let path = match written {
                Ok(Ok(path)) => path,
                Ok(Err(e)) => {
                    error!(error = %e, "Failed to write temporary audio file");
                    return;
                }
                Err(e) => {
                    error!(error = %e, "Temporary audio file writer panicked");
                    return;
                }
            };
            player.play_and_remove(path).await;
        }))
    }

    /// Play an already written file in a detached task, then remove it.
    pub fn spawn_playback(&self, path: TempPath) -> JoinHandle<()> {
        let player = self.clone();
        tokio::spawn(async move { player.play_and_remove(path).await })
    }

    async fn play_and_remove(&self, path: TempPath) {
        match self.play_file(&path).await {
            Ok(name) => info!(player = %name, "Audio playback finished"),
            Err(e) => warn!(error = %e, "Error playing audio"),
        }

        let shown = path.display().to_string();
        if let Err(e) = path.close() {
            error!(path = %shown, error = %e, "Error cleaning up temp file");
        }
    }
}

/// File extension for an audio MIME type.
pub fn extension_for(mime_type: &str) -> &'static str {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/ogg" | "audio/opus" => "ogg",
        "audio/flac" => "flac",
        "audio/aac" => "aac",
        "audio/webm" => "webm",
        _ => "mp3",
    }
}

/// Write audio to a `pollinations-audio-*` file in the temp directory.
pub fn write_temp(bytes: &[u8], mime_type: &str) -> std::io::Result<TempPath> {
    let suffix = format!(".{}", extension_for(mime_type));
    let mut file = tempfile::Builder::new()
        .prefix("pollinations-audio-")
        .suffix(&suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file.into_temp_path())
}
