//! Sparse shares
//!
//! Each blob occupies its own run of shares:
//!
//! ```text
//! first:        [namespace 29][info 1][blob len 4][data 478]
//! continuation: [namespace 29][info 1][data 482]
//! ```

use crate::compact::share_prefix;
use crate::errors::{Result, SquareError};
use shared_types::{
    Blob, Namespace, Share, CONTINUATION_SPARSE_SHARE_CONTENT_SIZE,
    FIRST_SPARSE_SHARE_CONTENT_SIZE, NAMESPACE_SIZE, SEQUENCE_LEN_BYTES, SHARE_INFO_BYTES,
    SHARE_SIZE, SHARE_VERSION_ZERO, TAIL_PADDING_NAMESPACE,
};

/// Shares needed for a blob of `blob_len` bytes.
pub fn sparse_shares_needed(blob_len: usize) -> usize {
    if blob_len <= FIRST_SPARSE_SHARE_CONTENT_SIZE {
        return 1;
    }
    1 + (blob_len - FIRST_SPARSE_SHARE_CONTENT_SIZE).div_ceil(CONTINUATION_SPARSE_SHARE_CONTENT_SIZE)
}

/// A padding share: sequence start with zero length.
fn padding_share(namespace: Namespace) -> Result<Share> {
    let mut buf = share_prefix(namespace, SHARE_VERSION_ZERO, true)?;
    buf.resize(SHARE_SIZE, 0);
    Ok(Share::from_bytes(buf)?)
}

/// Share filling the square after the last blob.
pub fn tail_padding_share() -> Result<Share> {
    padding_share(TAIL_PADDING_NAMESPACE)
}

/// Writes blobs into sparse shares in call order.
#[derive(Clone, Debug, Default)]
pub struct SparseShareSplitter {
    shares: Vec<Share>,
}

impl SparseShareSplitter {
    /// Empty splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the shares for one blob.
    pub fn write(&mut self, blob: &Blob) -> Result<()> {
        let blob_len = u32::try_from(blob.data.len())
            .map_err(|_| SquareError::SequenceTooLong { len: blob.data.len() })?;

        let mut cursor = 0;
        let mut first = true;
        while first || cursor < blob.data.len() {
            let mut buf = share_prefix(blob.namespace, blob.share_version, first)?;
            let capacity = if first {
                buf.extend_from_slice(&blob_len.to_be_bytes());
                FIRST_SPARSE_SHARE_CONTENT_SIZE
            } else {
                CONTINUATION_SPARSE_SHARE_CONTENT_SIZE
            };
            let end = (cursor + capacity).min(blob.data.len());
            buf.extend_from_slice(&blob.data[cursor..end]);
            buf.resize(SHARE_SIZE, 0);
            self.shares.push(Share::from_bytes(buf)?);

            cursor = end;
            first = false;
        }
        Ok(())
    }

    /// Take the written shares.
    pub fn export(self) -> Vec<Share> {
        self.shares
    }
}

/// Parse sparse shares back into blobs. Padding sequences are skipped.
pub fn parse_sparse_shares(shares: &[Share]) -> Result<Vec<Blob>> {
    let first_offset = NAMESPACE_SIZE + SHARE_INFO_BYTES + SEQUENCE_LEN_BYTES;
    let continuation_offset = NAMESPACE_SIZE + SHARE_INFO_BYTES;

    let mut blobs = Vec::new();
    let mut i = 0;
    while i < shares.len() {
        let head = &shares[i];
        let len = head.sequence_len().ok_or_else(|| {
            SquareError::MalformedShares(format!("share {i} does not start a sequence"))
        })? as usize;
        let count = sparse_shares_needed(len);
        let run = shares.get(i..i + count).ok_or_else(|| {
            SquareError::MalformedShares(format!("blob at share {i} is truncated"))
        })?;

        let mut data = Vec::with_capacity(len);
        for (j, share) in run.iter().enumerate() {
            if share.namespace() != head.namespace() {
                return Err(SquareError::MalformedShares(format!(
                    "share {} changes namespace mid-blob",
                    i + j
                )));
            }
            let offset = if j == 0 { first_offset } else { continuation_offset };
            data.extend_from_slice(&share.as_bytes()[offset..]);
        }
        data.truncate(len);

        if len > 0 {
            blobs.push(Blob {
                namespace: head.namespace(),
                data,
                share_version: head.info().version(),
            });
        }
        i += count;
    }
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(tag: &[u8]) -> Namespace {
        Namespace::new_v0(tag).unwrap()
    }

    #[test]
    fn test_share_counts() {
        assert_eq!(sparse_shares_needed(1), 1);
        assert_eq!(sparse_shares_needed(478), 1);
        assert_eq!(sparse_shares_needed(479), 2);
        assert_eq!(sparse_shares_needed(478 + 482), 2);
        assert_eq!(sparse_shares_needed(478 + 482 + 1), 3);
    }

    #[test]
    fn test_blob_layout() {
        let blob = Blob::new(ns(b"a"), vec![5u8; 600]);
        let mut splitter = SparseShareSplitter::new();
        splitter.write(&blob).unwrap();
        let shares = splitter.export();

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].namespace(), blob.namespace);
        assert_eq!(shares[0].sequence_len(), Some(600));
        assert_eq!(shares[1].sequence_len(), None);
        assert_eq!(&shares[1].as_bytes()[30..30 + 122], &[5u8; 122][..]);
        assert!(shares[1].as_bytes()[152..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_parse_roundtrip_multiple_blobs() {
        let blobs = vec![
            Blob::new(ns(b"a"), vec![1u8; 10]),
            Blob::new(ns(b"a"), vec![2u8; 1_000]),
            Blob::new(ns(b"b"), vec![3u8; 478]),
        ];
        let mut splitter = SparseShareSplitter::new();
        for blob in &blobs {
            splitter.write(blob).unwrap();
        }
        let mut shares = splitter.export();
        assert_eq!(shares.len(), 1 + 3 + 1);
        shares.push(tail_padding_share().unwrap());
        assert_eq!(parse_sparse_shares(&shares).unwrap(), blobs);
    }

    #[test]
    fn test_tail_padding_share() {
        let share = tail_padding_share().unwrap();
        assert_eq!(share.namespace(), TAIL_PADDING_NAMESPACE);
        assert!(share.info().is_sequence_start());
        assert_eq!(share.sequence_len(), Some(0));
    }
}
