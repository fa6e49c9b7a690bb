use encoding_rs::{Encoding, EUC_KR, UTF_8};

/// Ordered list of encodings to try on a raw byte buffer.
///
/// `encoding_rs` resolves both the "cp949" and "euc-kr" labels to its
/// windows-949 decoder, so the Korean side needs a single entry.
#[derive(Debug, Clone)]
pub struct DecodeStrategy {
    candidates: Vec<&'static Encoding>,
}

impl Default for DecodeStrategy {
    fn default() -> Self {
        // strict UTF-8 rejects CP949 bytes, the reverse is not true
        Self::new(vec![UTF_8, EUC_KR])
    }
}

/// Result of running a [`DecodeStrategy`] over a buffer.
#[derive(Debug, PartialEq)]
pub enum DecodeOutcome {
    Decoded {
        text: String,
        encoding: &'static Encoding,
    },
    Exhausted {
        tried: Vec<&'static str>,
    },
}

impl DecodeStrategy {
    pub fn new(candidates: Vec<&'static Encoding>) -> Self {
        Self { candidates }
    }

    /// Build a strategy from WHATWG labels such as `"cp949"` or `"utf-8"`.
    /// Unknown labels are dropped, duplicates collapse onto the first one.
    pub fn from_labels<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut candidates: Vec<&'static Encoding> = Vec::new();
        for label in labels {
            match Encoding::for_label(label.trim().as_bytes()) {
                Some(enc) if !candidates.contains(&enc) => candidates.push(enc),
                Some(_) => {}
                None => tracing::warn!(label, "unknown encoding label, ignoring"),
            }
        }
        Self { candidates }
    }

    pub fn candidates(&self) -> &[&'static Encoding] {
        &self.candidates
    }

    /// Try each candidate in order without replacement characters; the first
    /// clean decode wins. A byte-order mark is honoured before the list.
    pub fn decode(&self, bytes: &[u8]) -> DecodeOutcome {
        let mut tried = Vec::with_capacity(self.candidates.len() + 1);

        if let Some((enc, bom_len)) = Encoding::for_bom(bytes) {
            tried.push(enc.name());
            if let Some(text) = enc.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..]) {
                return DecodeOutcome::Decoded {
                    text: text.into_owned(),
                    encoding: enc,
                };
            }
        }

        for &enc in &self.candidates {
            if tried.contains(&enc.name()) {
                continue;
            }
            tried.push(enc.name());
            if let Some(text) = enc.decode_without_bom_handling_and_without_replacement(bytes) {
                tracing::debug!(encoding = enc.name(), "decoded");
                return DecodeOutcome::Decoded {
                    text: text.into_owned(),
                    encoding: enc,
                };
            }
            tracing::debug!(encoding = enc.name(), "decode attempt failed");
        }

        DecodeOutcome::Exhausted { tried }
    }
}
