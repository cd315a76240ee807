pub mod atomic_writer;
pub mod file_medium;
pub mod memory_medium;
pub mod slot_store;

pub use atomic_writer::AtomicWriter;
pub use file_medium::FileMedium;
pub use memory_medium::MemoryMedium;
pub use slot_store::SlotStore;
