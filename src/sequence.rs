//! Fixed-length sequence padding.
//!
//! Reproduces the `pad_sequences` convention the classifier was exported
//! with: every sequence is truncated or padded to one target length, with
//! independently configurable sides for truncation and padding.

use crate::vocab::PAD_ID;

/// Which end of a sequence an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// The front of the sequence.
    Pre,
    /// The back of the sequence.
    #[default]
    Post,
}

/// Target length and fill behavior for [`PaddingConfig::pad`].
///
/// `padding` and `truncation` are independent knobs: a config may truncate
/// from the front while padding at the back. Defaults match the shipped
/// model export — length 236, post-padding, post-truncation, fill 0.
#[derive(Debug, Clone)]
pub struct PaddingConfig {
    /// Exact output length of every padded sequence.
    pub max_len: usize,
    /// Which end the fill block is attached to when the input is short.
    pub padding: Side,
    /// Which end elements are dropped from when the input is long.
    pub truncation: Side,
    /// Value used for fill positions.
    pub fill: u32,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            max_len: 236,
            padding: Side::Post,
            truncation: Side::Post,
            fill: PAD_ID,
        }
    }
}

impl PaddingConfig {
    /// Force one sequence to exactly `max_len` elements.
    ///
    /// Longer inputs are truncated from the configured `truncation` side,
    /// shorter inputs get a fill block on the configured `padding` side, and
    /// inputs already at `max_len` come back unchanged. Exactly one of the
    /// three applies per call.
    pub fn pad(&self, seq: &[u32]) -> Vec<u32> {
        if seq.len() > self.max_len {
            let excess = seq.len() - self.max_len;
            return match self.truncation {
                Side::Pre => seq[excess..].to_vec(),
                Side::Post => seq[..self.max_len].to_vec(),
            };
        }

        let mut out = Vec::with_capacity(self.max_len);
        if seq.len() < self.max_len {
            let fill = vec![self.fill; self.max_len - seq.len()];
            match self.padding {
                Side::Pre => {
                    out.extend(fill);
                    out.extend_from_slice(seq);
                }
                Side::Post => {
                    out.extend_from_slice(seq);
                    out.extend(fill);
                }
            }
        } else {
            out.extend_from_slice(seq);
        }
        out
    }

    /// Pad every sequence in a batch independently to the same `max_len`.
    ///
    /// The model expects a batch dimension even for a single input, so the
    /// pipeline always goes through this entry point.
    pub fn pad_batch(&self, seqs: &[Vec<u32>]) -> Vec<Vec<u32>> {
        seqs.iter().map(|seq| self.pad(seq)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max_len: usize) -> PaddingConfig {
        PaddingConfig {
            max_len,
            ..PaddingConfig::default()
        }
    }

    #[test]
    fn post_padding_appends_fill() {
        assert_eq!(config(5).pad(&[1, 2, 3]), vec![1, 2, 3, 0, 0]);
    }

    #[test]
    fn pre_padding_prepends_fill() {
        let cfg = PaddingConfig {
            padding: Side::Pre,
            ..config(5)
        };
        assert_eq!(cfg.pad(&[1, 2, 3]), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn post_truncation_drops_the_tail() {
        assert_eq!(config(4).pad(&[1, 2, 3, 4, 5, 6]), vec![1, 2, 3, 4]);
    }

    #[test]
    fn pre_truncation_drops_the_front() {
        let cfg = PaddingConfig {
            truncation: Side::Pre,
            ..config(4)
        };
        assert_eq!(cfg.pad(&[1, 2, 3, 4, 5, 6]), vec![3, 4, 5, 6]);
    }

    #[test]
    fn exact_length_input_is_unchanged() {
        assert_eq!(config(3).pad(&[9, 8, 7]), vec![9, 8, 7]);
    }

    #[test]
    fn empty_input_pads_to_all_fill() {
        assert_eq!(config(4).pad(&[]), vec![0, 0, 0, 0]);
    }

    #[test]
    fn custom_fill_value_is_used() {
        let cfg = PaddingConfig {
            fill: 9,
            ..config(4)
        };
        assert_eq!(cfg.pad(&[1]), vec![1, 9, 9, 9]);
    }

    #[test]
    fn output_length_is_always_max_len() {
        let cfg = config(6);
        for n in 0..20 {
            let seq: Vec<u32> = (1..=n).collect();
            assert_eq!(cfg.pad(&seq).len(), 6);
        }
    }

    #[test]
    fn padding_and_truncation_sides_are_independent() {
        let cfg = PaddingConfig {
            padding: Side::Pre,
            truncation: Side::Post,
            ..config(3)
        };
        // Long input: post truncation, pre padding never kicks in.
        assert_eq!(cfg.pad(&[1, 2, 3, 4]), vec![1, 2, 3]);
        // Short input: pre padding, post truncation never kicks in.
        assert_eq!(cfg.pad(&[7]), vec![0, 0, 7]);
    }

    #[test]
    fn batch_rows_are_padded_independently() {
        let cfg = config(3);
        let rows = vec![vec![1], vec![1, 2, 3, 4], vec![5, 6, 7]];
        assert_eq!(
            cfg.pad_batch(&rows),
            vec![vec![1, 0, 0], vec![1, 2, 3], vec![5, 6, 7]]
        );
    }
}
