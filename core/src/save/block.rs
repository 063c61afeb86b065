//! One save block: a 32-bit key, a type tag, and a payload masked by a
//! key-seeded byte stream.

use crate::rng::XorShift32;

/// Block type tags as stored in the container (after unmasking).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    None = 0,
    /// Boolean singleton, value false. No payload.
    BoolFalse = 1,
    /// Boolean singleton, value true. No payload.
    BoolTrue = 2,
    /// Array-of-bool tag used for empty bool-array slots. No payload.
    BoolArray = 3,
    /// Opaque byte blob with an explicit length.
    Object = 4,
    /// Homogeneous primitive array with a recorded sub-type.
    Array = 5,
    U8 = 8,
    U16 = 9,
    U32 = 10,
    U64 = 11,
    I8 = 12,
    I16 = 13,
    I32 = 14,
    I64 = 15,
    F32 = 16,
    F64 = 17,
}

impl BlockType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::BoolFalse,
            2 => Self::BoolTrue,
            3 => Self::BoolArray,
            4 => Self::Object,
            5 => Self::Array,
            8 => Self::U8,
            9 => Self::U16,
            10 => Self::U32,
            11 => Self::U64,
            12 => Self::I8,
            13 => Self::I16,
            14 => Self::I32,
            15 => Self::I64,
            16 => Self::F32,
            17 => Self::F64,
            _ => Self::None,
        }
    }

    /// Encoded size of one element of this type. Types without a payload
    /// (and the array/object containers themselves) report 0.
    pub fn elem_size(self) -> usize {
        match self {
            Self::BoolArray | Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
            _ => 0,
        }
    }
}

/// A decoded save block. `data` holds the unmasked payload; for arrays,
/// `sub_type` records the element type.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub key: u32,
    pub block_type: BlockType,
    pub sub_type: BlockType,
    pub data: Vec<u8>,
}

impl Block {
    pub fn new(key: u32, block_type: BlockType) -> Self {
        Self {
            key,
            block_type,
            sub_type: BlockType::None,
            data: Vec::new(),
        }
    }

    pub fn new_object(key: u32, data: Vec<u8>) -> Self {
        Self {
            key,
            block_type: BlockType::Object,
            sub_type: BlockType::None,
            data,
        }
    }

    pub fn new_array(key: u32, sub_type: BlockType, data: Vec<u8>) -> Self {
        Self {
            key,
            block_type: BlockType::Array,
            sub_type,
            data,
        }
    }

    /// Parse one block from the pad-decrypted payload, advancing
    /// `offset` past it. Returns `None` if the stream ends mid-block; the
    /// byte alignment is load-bearing, so a short read here invalidates
    /// everything after it and parsing must stop.
    pub fn read_from(buf: &[u8], offset: &mut usize) -> Option<Self> {
        let key = u32::from_le_bytes(buf.get(*offset..*offset + 4)?.try_into().ok()?);
        *offset += 4;

        let mut stream = XorShift32::new(key);
        let block_type = BlockType::from_u8(buf.get(*offset)? ^ stream.next());
        *offset += 1;

        match block_type {
            BlockType::BoolFalse | BlockType::BoolTrue | BlockType::BoolArray => {
                Some(Self::new(key, block_type))
            }
            BlockType::Object => {
                let num_bytes =
                    u32::from_le_bytes(buf.get(*offset..*offset + 4)?.try_into().ok()?)
                        ^ stream.next32();
                *offset += 4;
                let data = Self::read_masked(buf, offset, num_bytes as usize, &mut stream)?;
                Some(Self::new_object(key, data))
            }
            BlockType::Array => {
                let num_entries =
                    u32::from_le_bytes(buf.get(*offset..*offset + 4)?.try_into().ok()?)
                        ^ stream.next32();
                *offset += 4;
                let sub_type = BlockType::from_u8(buf.get(*offset)? ^ stream.next());
                *offset += 1;
                let num_bytes = num_entries as usize * sub_type.elem_size();
                let data = Self::read_masked(buf, offset, num_bytes, &mut stream)?;
                Some(Self::new_array(key, sub_type, data))
            }
            _ => {
                let num_bytes = block_type.elem_size();
                let data = Self::read_masked(buf, offset, num_bytes, &mut stream)?;
                Some(Self {
                    key,
                    block_type,
                    sub_type: BlockType::None,
                    data,
                })
            }
        }
    }

    fn read_masked(
        buf: &[u8],
        offset: &mut usize,
        len: usize,
        stream: &mut XorShift32,
    ) -> Option<Vec<u8>> {
        let raw = buf.get(*offset..*offset + len)?;
        *offset += len;
        Some(raw.iter().map(|&b| b ^ stream.next()).collect())
    }

    /// Encoded size: key + type byte + optional length/sub-type header +
    /// payload.
    pub fn encoded_size(&self) -> usize {
        let header = match self.block_type {
            BlockType::BoolFalse | BlockType::BoolTrue | BlockType::BoolArray => 0,
            BlockType::Object => 4,
            BlockType::Array => 5,
            _ => 0,
        };
        4 + 1 + header + self.data.len()
    }

    /// Append the masked encoding of this block. The mask stream restarts
    /// from this block's key; the whole-payload XOR pad is applied later
    /// in one sweep by the caller.
    pub fn write_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.key.to_le_bytes());

        let mut stream = XorShift32::new(self.key);
        out.push(self.block_type as u8 ^ stream.next());

        match self.block_type {
            BlockType::BoolFalse | BlockType::BoolTrue | BlockType::BoolArray => {}
            BlockType::Object => {
                let len = self.data.len() as u32 ^ stream.next32();
                out.extend_from_slice(&len.to_le_bytes());
            }
            BlockType::Array => {
                let elem = self.sub_type.elem_size();
                let entries = if elem > 0 {
                    (self.data.len() / elem) as u32
                } else {
                    0
                };
                out.extend_from_slice(&(entries ^ stream.next32()).to_le_bytes());
                out.push(self.sub_type as u8 ^ stream.next());
            }
            _ => {}
        }

        out.extend(self.data.iter().map(|&b| b ^ stream.next()));
    }
}
