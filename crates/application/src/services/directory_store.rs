use super::host_directory::HostDirectory;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Owner of "the current Host Directory".
///
/// The snapshot is swapped atomically via `ArcSwap`: readers take a
/// reference with [`current`](Self::current) without ever blocking on a
/// writer, and [`publish`](Self::publish) replaces the whole directory in
/// one pointer store. A reader holding an older `Arc` keeps seeing that
/// snapshot in full until it drops it.
pub struct DirectoryStore {
    current: ArcSwap<HostDirectory>,
}

impl DirectoryStore {
    /// Starts with an empty directory so every query misses until the first
    /// successful refresh.
    pub fn new() -> Self {
        Self {
            current: ArcSwap::from_pointee(HostDirectory::empty()),
        }
    }

    pub fn current(&self) -> Arc<HostDirectory> {
        self.current.load_full()
    }

    pub fn publish(&self, directory: HostDirectory) {
        self.current.store(Arc::new(directory));
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}
