use std::path::Path;

/// Core trait for every per-cluster codec of a tile
///
/// Each codec owns one open file, declares its cluster count up front and
/// is consumed exactly once, one cluster at a time.
pub trait ClusterCodec {
    /// Returns the path of the underlying file
    fn path(&self) -> &Path;

    /// Returns the number of clusters the file declares
    fn total_clusters(&self) -> usize;

    /// Returns the number of clusters decoded so far
    fn current_cluster(&self) -> usize;

    /// Returns true while clusters remain to be decoded
    fn has_next(&self) -> bool {
        self.current_cluster() < self.total_clusters()
    }

    /// Releases the underlying file handle; closing twice is a no-op
    fn close(&mut self);
}
