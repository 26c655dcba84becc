//! Text-to-speech through the Google Translate speech endpoint.
//!
//! The endpoint only accepts short inputs, so text is split into chunks of at
//! most [`MAX_CHUNK_CHARS`] characters. Each chunk comes back as a standalone
//! MP3 stream and the streams are concatenated, which players accept as a
//! single file.

use std::fmt;
use async_trait::async_trait;
use nt_core::{Config, Error, Result, SpeechSynthesizer};
use reqwest::Client;

pub const MAX_CHUNK_CHARS: usize = 100;

const SENTENCE_BREAKS: &[char] = &['.', '!', '?', '।', '॥', '\n'];

pub struct GoogleTranslateTts {
    client: Client,
    base_url: String,
}

impl fmt::Debug for GoogleTranslateTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTranslateTts")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GoogleTranslateTts {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.tts_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_chunk(&self, chunk: &str, language: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("Request to TTS service failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Synthesis(format!("TTS service returned HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Synthesis(format!("Failed to read TTS audio: {}", e)))?;
        if !is_mp3(&bytes) {
            return Err(Error::Synthesis("TTS service did not return MP3 audio".to_string()));
        }
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Synthesis("No text to speak".to_string()));
        }

        tracing::info!("🔊 Synthesizing {} chunks of {} speech", chunks.len(), language);
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, language, idx, chunks.len()).await?);
        }
        Ok(audio)
    }
}

/// True if `bytes` open with an ID3 tag or an MPEG audio frame sync.
pub fn is_mp3(bytes: &[u8]) -> bool {
    bytes.starts_with(b"ID3") || (bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] & 0xE0 == 0xE0)
}

/// Splits text into chunks of at most `max_chars` characters.
///
/// Chunks end at sentence breaks where possible, then between words; a word
/// longer than `max_chars` is cut. Chunks without a letter or digit are
/// dropped since there is nothing to speak in them.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences(text) {
        for word in sentence.split_whitespace() {
            let word_len = word.chars().count();
            if word_len > max_chars {
                flush(&mut chunks, &mut current);
                let chars: Vec<char> = word.chars().collect();
                for part in chars.chunks(max_chars) {
                    current.extend(part);
                    flush(&mut chunks, &mut current);
                }
                continue;
            }

            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word_len > max_chars {
                flush(&mut chunks, &mut current);
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        flush(&mut chunks, &mut current);
    }

    chunks
}

/// Splits after each run of sentence marks. A run made only of `.` ends a
/// sentence only before whitespace or the end of the text, so decimals stay
/// whole.
fn sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !SENTENCE_BREAKS.contains(&chars[i].1) {
            i += 1;
            continue;
        }
        let mut j = i + 1;
        while j < chars.len() && SENTENCE_BREAKS.contains(&chars[j].1) {
            j += 1;
        }
        let next = chars.get(j);
        let only_dots = chars[i..j].iter().all(|&(_, c)| c == '.');
        if !only_dots || next.map_or(true, |&(_, c)| c.is_whitespace()) {
            let end = next.map_or(text.len(), |&(offset, _)| offset);
            sentences.push(&text[start..end]);
            start = end;
        }
        i = j;
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn flush(chunks: &mut Vec<String>, current: &mut String) {
    let chunk = std::mem::take(current);
    if chunk.chars().any(char::is_alphanumeric) {
        chunks.push(chunk);
    }
}
