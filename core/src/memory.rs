//! Live-memory collaborator boundary.
//!
//! The core never talks to a debugger service directly; a host-side
//! provider implements [`MemoryReader`] and the pipeline asks it for
//! the handful of structures it needs.

/// Reads bytes out of the running game's address space.
pub trait MemoryReader {
    /// Dereference a pointer chain. The first element is an offset from
    /// the game's main-image base; each following element is added after
    /// a pointer load. Returns `None` when any step fails.
    fn read_chain(&self, chain: &[u64], len: usize) -> Option<Vec<u8>>;

    /// Read a flat range at a fixed heap offset.
    fn read_heap(&self, offset: u64, len: usize) -> Option<Vec<u8>>;
}

#[cfg(test)]
pub mod testing {
    use super::MemoryReader;
    use std::collections::HashMap;

    /// Scripted provider returning canned buffers, for pipeline tests.
    #[derive(Default)]
    pub struct ScriptedMemory {
        chains: HashMap<Vec<u64>, Vec<u8>>,
        heap: HashMap<u64, Vec<u8>>,
    }

    impl ScriptedMemory {
        pub fn with_chain(mut self, chain: &[u64], bytes: Vec<u8>) -> Self {
            self.chains.insert(chain.to_vec(), bytes);
            self
        }

        pub fn with_heap(mut self, offset: u64, bytes: Vec<u8>) -> Self {
            self.heap.insert(offset, bytes);
            self
        }
    }

    impl MemoryReader for ScriptedMemory {
        fn read_chain(&self, chain: &[u64], len: usize) -> Option<Vec<u8>> {
            let bytes = self.chains.get(chain)?;
            (bytes.len() >= len).then(|| bytes[..len].to_vec())
        }

        fn read_heap(&self, offset: u64, len: usize) -> Option<Vec<u8>> {
            let bytes = self.heap.get(&offset)?;
            (bytes.len() >= len).then(|| bytes[..len].to_vec())
        }
    }
}
