//! Compact shares
//!
//! Transactions and PFB transactions are written as a single byte stream of
//! varint length-prefixed units split across shares:
//!
//! ```text
//! first:        [namespace 29][info 1][sequence len 4][reserved 4][data 474]
//! continuation: [namespace 29][info 1][reserved 4][data 478]
//! ```
//!
//! The reserved field holds the offset, within the share, of the first unit
//! that starts in it, or 0 if none does.

use crate::errors::{Result, SquareError};
use crate::varint::{decode_uvarint, encode_uvarint, uvarint_len};
use shared_types::{
    InfoByte, Namespace, Share, COMPACT_SHARE_RESERVED_BYTES,
    CONTINUATION_COMPACT_SHARE_CONTENT_SIZE, FIRST_COMPACT_SHARE_CONTENT_SIZE, NAMESPACE_SIZE,
    SEQUENCE_LEN_BYTES, SHARE_INFO_BYTES, SHARE_SIZE,
};

/// Shares needed to hold a compact sequence of `sequence_len` bytes.
pub fn compact_shares_needed(sequence_len: usize) -> usize {
    if sequence_len == 0 {
        return 0;
    }
    if sequence_len <= FIRST_COMPACT_SHARE_CONTENT_SIZE {
        return 1;
    }
    1 + (sequence_len - FIRST_COMPACT_SHARE_CONTENT_SIZE)
        .div_ceil(CONTINUATION_COMPACT_SHARE_CONTENT_SIZE)
}

/// Bytes a unit occupies in the sequence, length prefix included.
pub fn unit_len(unit: &[u8]) -> usize {
    uvarint_len(unit.len() as u64) + unit.len()
}

/// `namespace || info` for a new share.
pub(crate) fn share_prefix(namespace: Namespace, version: u8, sequence_start: bool) -> Result<Vec<u8>> {
    let info = InfoByte::new(version, sequence_start).ok_or(SquareError::ShareVersion { version })?;
    let mut buf = Vec::with_capacity(SHARE_SIZE);
    buf.extend_from_slice(&namespace.to_bytes());
    buf.push(info.as_u8());
    Ok(buf)
}

/// Accumulates units for one namespace and splits them into compact shares.
#[derive(Clone, Debug)]
pub struct CompactShareSplitter {
    namespace: Namespace,
    share_version: u8,
    sequence: Vec<u8>,
    unit_starts: Vec<usize>,
}

impl CompactShareSplitter {
    /// Empty splitter for `namespace`.
    pub fn new(namespace: Namespace, share_version: u8) -> Self {
        Self {
            namespace,
            share_version,
            sequence: Vec::new(),
            unit_starts: Vec::new(),
        }
    }

    /// Append one unit.
    pub fn write_unit(&mut self, unit: &[u8]) {
        self.unit_starts.push(self.sequence.len());
        encode_uvarint(unit.len() as u64, &mut self.sequence);
        self.sequence.extend_from_slice(unit);
    }

    /// Sequence length in bytes.
    pub fn sequence_len(&self) -> usize {
        self.sequence.len()
    }

    /// Shares [`export`](Self::export) will produce.
    pub fn share_count(&self) -> usize {
        compact_shares_needed(self.sequence.len())
    }

    /// Split the sequence into shares. No units yields no shares.
    pub fn export(&self) -> Result<Vec<Share>> {
        if self.sequence.is_empty() {
            return Ok(Vec::new());
        }
        let sequence_len = u32::try_from(self.sequence.len()).map_err(|_| {
            SquareError::SequenceTooLong {
                len: self.sequence.len(),
            }
        })?;

        let mut shares = Vec::with_capacity(self.share_count());
        let mut cursor = 0;
        let mut next_unit = 0;

        while cursor < self.sequence.len() {
            let first = cursor == 0;
            let capacity = if first {
                FIRST_COMPACT_SHARE_CONTENT_SIZE
            } else {
                CONTINUATION_COMPACT_SHARE_CONTENT_SIZE
            };
            let end = (cursor + capacity).min(self.sequence.len());

            let mut buf = share_prefix(self.namespace, self.share_version, first)?;
            if first {
                buf.extend_from_slice(&sequence_len.to_be_bytes());
            }
            let header_len = buf.len() + COMPACT_SHARE_RESERVED_BYTES;

            while next_unit < self.unit_starts.len() && self.unit_starts[next_unit] < cursor {
                next_unit += 1;
            }
            let reserved = match self.unit_starts.get(next_unit) {
                Some(&start) if start < end => (header_len + start - cursor) as u32,
                _ => 0,
            };
            buf.extend_from_slice(&reserved.to_be_bytes());
            buf.extend_from_slice(&self.sequence[cursor..end]);
            buf.resize(SHARE_SIZE, 0);

            shares.push(Share::from_bytes(buf)?);
            cursor = end;
        }

        Ok(shares)
    }
}

/// Parse a run of compact shares of one namespace back into units.
pub fn parse_compact_shares(shares: &[Share]) -> Result<Vec<Vec<u8>>> {
    let Some(first) = shares.first() else {
        return Ok(Vec::new());
    };
    let sequence_len = first
        .sequence_len()
        .ok_or_else(|| SquareError::MalformedShares("first share does not start a sequence".into()))?
        as usize;

    let continuation_offset = NAMESPACE_SIZE + SHARE_INFO_BYTES + COMPACT_SHARE_RESERVED_BYTES;
    let first_offset = continuation_offset + SEQUENCE_LEN_BYTES;

    let mut sequence = Vec::with_capacity(sequence_len);
    for (i, share) in shares.iter().enumerate() {
        if share.namespace() != first.namespace() {
            return Err(SquareError::MalformedShares(format!(
                "share {i} changes namespace"
            )));
        }
        if i > 0 && share.info().is_sequence_start() {
            return Err(SquareError::MalformedShares(format!(
                "share {i} starts a second sequence"
            )));
        }
        let offset = if i == 0 { first_offset } else { continuation_offset };
        sequence.extend_from_slice(&share.as_bytes()[offset..]);
    }
    if sequence.len() < sequence_len {
        return Err(SquareError::MalformedShares(format!(
            "sequence length {sequence_len} exceeds share content {}",
            sequence.len()
        )));
    }
    sequence.truncate(sequence_len);

    let mut units = Vec::new();
    let mut pos = 0;
    while pos < sequence.len() {
        let (len, read) = decode_uvarint(&sequence[pos..])
            .ok_or_else(|| SquareError::MalformedShares(format!("bad unit length at {pos}")))?;
        pos += read;
        let end = usize::try_from(len)
            .ok()
            .and_then(|len| pos.checked_add(len))
            .filter(|end| *end <= sequence.len())
            .ok_or_else(|| SquareError::MalformedShares(format!("unit at {pos} overruns sequence")))?;
        units.push(sequence[pos..end].to_vec());
        pos = end;
    }
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::TX_NAMESPACE;

    #[test]
    fn test_share_counts() {
        assert_eq!(compact_shares_needed(0), 0);
        assert_eq!(compact_shares_needed(1), 1);
        assert_eq!(compact_shares_needed(474), 1);
        assert_eq!(compact_shares_needed(475), 2);
        assert_eq!(compact_shares_needed(474 + 478), 2);
        assert_eq!(compact_shares_needed(474 + 478 + 1), 3);
    }

    #[test]
    fn test_single_unit_layout() {
        let mut splitter = CompactShareSplitter::new(TX_NAMESPACE, 0);
        splitter.write_unit(&[0xAA; 10]);
        let shares = splitter.export().unwrap();

        assert_eq!(shares.len(), 1);
        let share = &shares[0];
        assert_eq!(share.namespace(), TX_NAMESPACE);
        assert!(share.info().is_sequence_start());
        assert_eq!(share.sequence_len(), Some(11));
        // reserved bytes point just past the header
        assert_eq!(&share.as_bytes()[34..38], &38u32.to_be_bytes());
        assert_eq!(share.as_bytes()[38], 10);
        assert_eq!(&share.as_bytes()[39..49], &[0xAA; 10]);
        assert!(share.as_bytes()[49..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_reserved_offset_in_continuation() {
        let mut splitter = CompactShareSplitter::new(TX_NAMESPACE, 0);
        // 2 + 500 bytes spill 28 bytes into the second share
        splitter.write_unit(&[1u8; 500]);
        splitter.write_unit(&[2u8; 5]);
        let shares = splitter.export().unwrap();

        assert_eq!(shares.len(), 2);
        assert!(!shares[1].info().is_sequence_start());
        let second_unit_offset = 34 + 28;
        assert_eq!(
            &shares[1].as_bytes()[30..34],
            &(second_unit_offset as u32).to_be_bytes()
        );
        assert_eq!(shares[1].as_bytes()[second_unit_offset], 5);
    }

    #[test]
    fn test_no_unit_start_gives_zero_offset() {
        let mut splitter = CompactShareSplitter::new(TX_NAMESPACE, 0);
        splitter.write_unit(&[7u8; 1_200]);
        let shares = splitter.export().unwrap();

        assert_eq!(shares.len(), 3);
        assert_eq!(&shares[1].as_bytes()[30..34], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_parse_recovers_units() {
        let units: Vec<Vec<u8>> = (0..20u8).map(|i| vec![i; 37 * i as usize + 1]).collect();
        let mut splitter = CompactShareSplitter::new(TX_NAMESPACE, 0);
        for unit in &units {
            splitter.write_unit(unit);
        }
        let shares = splitter.export().unwrap();

        assert_eq!(shares.len(), splitter.share_count());
        assert_eq!(parse_compact_shares(&shares).unwrap(), units);
    }

    #[test]
    fn test_empty_splitter_exports_nothing() {
        let splitter = CompactShareSplitter::new(TX_NAMESPACE, 0);
        assert!(splitter.export().unwrap().is_empty());
        assert!(parse_compact_shares(&[]).unwrap().is_empty());
    }
}
