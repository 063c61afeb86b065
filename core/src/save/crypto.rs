//! Whole-container encrypt/decrypt: the repeating static XOR pad, the
//! block-stream parse, and the trailing SHA-256 integrity tag.

use sha2::{Digest, Sha256};

use super::block::Block;
use crate::constants::{HASH_INTRO, HASH_OUTRO, HASH_SIZE, XOR_PAD};
use crate::error::{CoreError, Result};

/// XOR `data` in place against the repeating 127-byte pad. The pad
/// stride never resets at block boundaries.
pub fn crypt_static_pad(data: &mut [u8]) {
    for (i, byte) in data.iter_mut().enumerate() {
        *byte ^= XOR_PAD[i % XOR_PAD.len()];
    }
}

/// Integrity tag over `intro || plaintext payload || outro`.
pub fn compute_hash(payload: &[u8]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(HASH_INTRO);
    hasher.update(payload);
    hasher.update(HASH_OUTRO);
    hasher.finalize().into()
}

/// Decrypt a save container into its block list.
///
/// The trailing tag is not verified on read; saves reaching this point
/// are trusted. Parsing stops early (with a warning) if a block runs
/// past the payload end, since every later block would be misaligned.
pub fn decrypt(file_data: &[u8]) -> Result<Vec<Block>> {
    if file_data.len() < HASH_SIZE {
        return Err(CoreError::TruncatedSave {
            len: file_data.len(),
        });
    }

    let payload_len = file_data.len() - HASH_SIZE;
    let mut payload = file_data[..payload_len].to_vec();
    crypt_static_pad(&mut payload);

    let mut blocks = Vec::new();
    let mut offset = 0;
    while offset < payload_len {
        match Block::read_from(&payload, &mut offset) {
            Some(block) => blocks.push(block),
            None => {
                log::warn!(
                    "save block stream ends mid-block at offset {:#X}; keeping {} blocks",
                    offset,
                    blocks.len()
                );
                break;
            }
        }
    }

    log::debug!("decrypted save: {} blocks, {} payload bytes", blocks.len(), payload_len);
    Ok(blocks)
}

/// Re-encode blocks into a full container: blocks in input order, the
/// tag computed over the plaintext payload, then the static pad applied
/// in one sweep and the tag appended.
pub fn encrypt(blocks: &[Block]) -> Vec<u8> {
    let payload_len: usize = blocks.iter().map(Block::encoded_size).sum();
    let mut out = Vec::with_capacity(payload_len + HASH_SIZE);

    for block in blocks {
        block.write_into(&mut out);
    }

    let tag = compute_hash(&out);
    crypt_static_pad(&mut out);
    out.extend_from_slice(&tag);
    out
}

/// Linear scan by key. Well-formed saves never carry duplicate keys.
pub fn find_block(blocks: &[Block], key: u32) -> Option<&Block> {
    blocks.iter().find(|b| b.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save::BlockType;

    fn sample_blocks() -> Vec<Block> {
        vec![
            Block::new(0x0000_0001, BlockType::BoolFalse),
            Block::new(0x0000_0002, BlockType::BoolTrue),
            Block::new(0x0000_0003, BlockType::BoolArray),
            Block::new_object(0xCAAC_8800, (0..=255).collect()),
            Block::new_array(0x100B_93DA, BlockType::U32, vec![9; 24]),
            Block {
                key: 0xE3E8_9BD1,
                block_type: BlockType::U64,
                sub_type: BlockType::None,
                data: 0x0123_4567_89AB_CDEFu64.to_le_bytes().to_vec(),
            },
        ]
    }

    #[test]
    fn test_roundtrip_preserves_bytes() {
        let bytes = encrypt(&sample_blocks());
        let blocks = decrypt(&bytes).expect("decrypt failed");
        assert_eq!(blocks.len(), 6);
        assert_eq!(encrypt(&blocks), bytes);
    }

    #[test]
    fn test_roundtrip_of_empty_bool_save() {
        let blocks = vec![
            Block::new(0x0000_0001, BlockType::BoolFalse),
            Block::new(0x0000_0002, BlockType::BoolTrue),
        ];
        let bytes = encrypt(&blocks);
        // 2 blocks of 5 bytes each plus the tag.
        assert_eq!(bytes.len(), 10 + HASH_SIZE);
        let parsed = decrypt(&bytes).expect("decrypt failed");
        assert_eq!(parsed, blocks);
        assert_eq!(encrypt(&parsed), bytes);
    }

    #[test]
    fn test_blocks_decrypt_independently_of_position() {
        let mut blocks = sample_blocks();
        blocks.swap(0, 3);
        blocks.swap(1, 4);
        let parsed = decrypt(&encrypt(&blocks)).expect("decrypt failed");
        assert_eq!(parsed, blocks);
    }

    #[test]
    fn test_tag_matches_salted_sha256_of_plaintext() {
        let blocks = sample_blocks();
        let bytes = encrypt(&blocks);

        let mut plaintext = bytes[..bytes.len() - HASH_SIZE].to_vec();
        crypt_static_pad(&mut plaintext);

        let mut hasher = Sha256::new();
        hasher.update(HASH_INTRO);
        hasher.update(&plaintext);
        hasher.update(HASH_OUTRO);
        let expected: [u8; HASH_SIZE] = hasher.finalize().into();

        assert_eq!(&bytes[bytes.len() - HASH_SIZE..], expected);
    }

    #[test]
    fn test_tag_not_verified_on_read() {
        let mut bytes = encrypt(&sample_blocks());
        let len = bytes.len();
        bytes[len - 1] ^= 0xFF;
        assert!(decrypt(&bytes).is_ok());
    }

    #[test]
    fn test_pad_stride_independent_of_blocks() {
        // A payload longer than one pad stride must keep cycling the pad
        // rather than restarting it per block.
        let blocks = vec![Block::new_object(0x1111_2222, vec![0u8; 300])];
        let bytes = encrypt(&blocks);
        let parsed = decrypt(&bytes).expect("decrypt failed");
        assert_eq!(parsed[0].data, vec![0u8; 300]);
    }

    #[test]
    fn test_short_container_is_rejected() {
        let err = decrypt(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, CoreError::TruncatedSave { len: 16 }));
    }

    #[test]
    fn test_find_block_by_key() {
        let blocks = sample_blocks();
        assert!(find_block(&blocks, 0xCAAC_8800).is_some());
        assert!(find_block(&blocks, 0x4242_4242).is_none());
    }
}
