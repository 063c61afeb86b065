//! Save-container codec: a contiguous stream of key-tagged, per-block
//! stream-ciphered blocks, XORed as a whole against a repeating static
//! pad and terminated by a 32-byte integrity tag.

mod block;
mod crypto;

pub use block::{Block, BlockType};
pub use crypto::{compute_hash, crypt_static_pad, decrypt, encrypt, find_block};
