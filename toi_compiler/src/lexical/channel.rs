//! Tokenizer running on its own thread
//!
//! Tokens cross a capacity-zero channel, so the producer is never more than
//! one token ahead of the parser. Dropping the consumer makes the next send
//! fail and the producer thread exits.

use super::analyzer::{LexerError, Tokenizer};
use crate::config::runtime::{runtime_config, LexicalPreferences};
use crate::log_debug;
use crate::tokens::Token;
use std::io::Read;
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Consumer side of a spawned tokenizer
#[derive(Debug)]
pub struct ChannelSource {
    receiver: Receiver<Token>,
}

impl Iterator for ChannelSource {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        // Disconnection means the producer delivered its terminal token and left
        self.receiver.recv().ok()
    }
}

/// Start tokenizing `reader` on a new thread
pub fn spawn_tokenizer<R>(reader: R) -> Result<ChannelSource, LexerError>
where
    R: Read + Send + 'static,
{
    spawn_tokenizer_with_preferences(reader, runtime_config().lexical.clone())
}

pub fn spawn_tokenizer_with_preferences<R>(
    reader: R,
    preferences: LexicalPreferences,
) -> Result<ChannelSource, LexerError>
where
    R: Read + Send + 'static,
{
    let (sender, receiver) = mpsc::sync_channel(0);

    thread::Builder::new()
        .name("toi-tokenizer".to_string())
        .spawn(move || {
            let mut delivered = 0usize;
            for token in Tokenizer::with_preferences(reader, preferences) {
                if sender.send(token).is_err() {
                    log_debug!("Tokenizer consumer went away", "delivered" => delivered);
                    return;
                }
                delivered += 1;
            }
        })
        .map_err(|e| LexerError::ProducerUnavailable {
            message: e.to_string(),
        })?;

    Ok(ChannelSource { receiver })
}
