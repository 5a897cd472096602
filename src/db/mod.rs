//! Database layer (Firestore).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by user ID)
    pub const USERS: &str = "users";
    /// Attendance records (keyed by `{userId}_{date}`)
    pub const GYM_STATUSES: &str = "gymStatuses";
}
