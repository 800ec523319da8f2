//! Thread-safe handle to the current network snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::dataset::{DatasetError, load_stations};

use super::context::Network;

/// Shared, swappable network.
///
/// Readers take a cheap [`Arc`] snapshot and search it without holding the
/// lock. Writers either replace the whole network (dataset reload) or
/// mutate crowd fractions, which copies the snapshot only if a reader still
/// holds the old one.
#[derive(Clone)]
pub struct SharedNetwork {
    inner: Arc<RwLock<Arc<Network>>>,
    source: Option<PathBuf>,
}

impl SharedNetwork {
    /// Wrap an in-memory network (no reload source).
    pub fn new(network: Network) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(network))),
            source: None,
        }
    }

    /// Load stations from a dataset file and build the network.
    ///
    /// Fails if the file is missing or malformed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let path = path.into();
        let stations = load_stations(&path)?;

        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(Network::new(stations)))),
            source: Some(path),
        })
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Arc<Network> {
        self.inner.read().await.clone()
    }

    /// Number of stations in the current snapshot.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Replace the network wholesale.
    pub async fn replace(&self, network: Network) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(network);
    }

    /// Mutate the current network in place.
    pub async fn update<R>(&self, f: impl FnOnce(&mut Network) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(Arc::make_mut(&mut guard))
    }

    /// Re-read the dataset file and rebuild the graph.
    ///
    /// On failure the existing network is kept and the error returned.
    /// Crowd fractions start from whatever the file carries.
    pub async fn reload(&self) -> Result<usize, DatasetError> {
        self.reload_with(|_| ()).await.map(|(count, ())| count)
    }

    /// Like [`reload`](Self::reload), but runs `prepare` on the new network
    /// before it is published, so readers never see it half set up.
    pub async fn reload_with<R>(
        &self,
        prepare: impl FnOnce(&mut Network) -> R,
    ) -> Result<(usize, R), DatasetError> {
        let Some(path) = &self.source else {
            return Err(DatasetError::NoSource);
        };

        let stations = load_stations(path)?;
        let count = stations.len();
        let mut network = Network::new(stations);
        let prepared = prepare(&mut network);
        self.replace(network).await;

        Ok((count, prepared))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Station;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn two_stations() -> Network {
        Network::new(vec![
            Station::new("KJ1", "Gombak", "KJ", 3.2312, 101.7245),
            Station::new("KJ2", "Taman Melati", "KJ", 3.2193, 101.7219),
        ])
    }

    #[tokio::test]
    async fn snapshot_survives_replace() {
        let shared = SharedNetwork::new(two_stations());
        let before = shared.snapshot().await;

        shared.replace(Network::empty()).await;

        assert_eq!(before.len(), 2);
        assert!(shared.is_empty().await);
    }

    #[tokio::test]
    async fn update_copies_on_write() {
        let shared = SharedNetwork::new(two_stations());
        let before = shared.snapshot().await;

        let changed = shared.update(|n| n.set_crowd(&"KJ1".into(), 0.9)).await;
        assert!(changed);

        let after = shared.snapshot().await;
        assert_eq!(after.station(&"KJ1".into()).unwrap().crowd(), 0.9);
        assert_eq!(before.station(&"KJ1".into()).unwrap().crowd(), 0.0);
    }

    #[tokio::test]
    async fn reload_without_source_fails() {
        let shared = SharedNetwork::new(two_stations());
        assert!(matches!(shared.reload().await, Err(DatasetError::NoSource)));
        assert_eq!(shared.len().await, 2);
    }

    #[tokio::test]
    async fn load_and_reload_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"KJ1","name":"Gombak","route_id":"KJ","lat":3.2312,"lng":101.7245}}]"#
        )
        .unwrap();

        let shared = SharedNetwork::load(file.path()).unwrap();
        assert_eq!(shared.len().await, 1);

        std::fs::write(
            file.path(),
            r#"[
                {"id":"KJ1","name":"Gombak","route_id":"KJ","lat":3.2312,"lng":101.7245},
                {"id":"KJ2","name":"Taman Melati","route_id":"KJ","lat":3.2193,"lng":101.7219}
            ]"#,
        )
        .unwrap();

        assert_eq!(shared.reload().await.unwrap(), 2);
        let snapshot = shared.snapshot().await;
        assert!(snapshot.graph().has_edge(&"KJ1".into(), &"KJ2".into()));
    }

    #[tokio::test]
    async fn reload_with_prepares_before_publishing() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"id":"KJ1","name":"Gombak","route_id":"KJ","lat":3.2312,"lng":101.7245}]"#,
        )
        .unwrap();
        let shared = SharedNetwork::load(file.path()).unwrap();

        let (count, changed) = shared
            .reload_with(|n| n.set_crowd(&"KJ1".into(), 0.6))
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(changed);
        assert_eq!(
            shared.snapshot().await.station(&"KJ1".into()).unwrap().crowd(),
            0.6
        );
    }

    #[tokio::test]
    async fn failed_reload_keeps_network() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            r#"[{"id":"KJ1","name":"Gombak","route_id":"KJ","lat":3.2312,"lng":101.7245}]"#,
        )
        .unwrap();

        let shared = SharedNetwork::load(file.path()).unwrap();
        std::fs::write(file.path(), "not json").unwrap();

        assert!(shared.reload().await.is_err());
        assert_eq!(shared.len().await, 1);
    }
}
