use crate::adapters::media::{FileMedium, VolatileMedium};
use crate::domain::config::{DurabilityMode, JournalConfig};
use crate::domain::errors::StoreError;
use crate::domain::snapshot::SnapshotCodec;
use crate::domain::store::AddressedStore;
use crate::ports::outbound::SnapshotMedium;
use tracing::{debug, info};

/// How the journal found its medium at open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartKind {
    /// Nothing committed; the store starts empty.
    Cold,
    /// A committed snapshot was restored.
    Warm,
}

/// Outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitReceipt {
    pub sequence: u64,
    /// Framed bytes written; zero for a non-durable medium.
    pub bytes: usize,
    pub compressed: bool,
}

/// Crash-consistent wrapper around the store.
pub struct DurableJournal {
    store: AddressedStore,
    medium: Box<dyn SnapshotMedium>,
    codec: SnapshotCodec,
    committed_sequence: u64,
    start: StartKind,
}

impl std::fmt::Debug for DurableJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableJournal")
            .field("medium", &self.medium.describe())
            .field("committed_sequence", &self.committed_sequence)
            .field("start", &self.start)
            .field("entries", &self.store.entry_count())
            .finish()
    }
}

impl DurableJournal {
    /// Open the journal a configuration describes.
    ///
    /// # Errors
    ///
    /// `StoreError::StoreCorrupt` if a committed snapshot exists but does not
    /// verify; the journal refuses to start on unknown state.
    pub fn open(config: &JournalConfig) -> Result<Self, StoreError> {
        let medium: Box<dyn SnapshotMedium> = match &config.durability {
            DurabilityMode::MemoryOnly => Box::new(VolatileMedium),
            DurabilityMode::FileBacked { data_dir } => {
                Box::new(FileMedium::open(data_dir, config.lock_data_dir)?)
            }
        };
        Self::with_medium(medium, SnapshotCodec::new(&config.compression))
    }

    /// Open over an explicit medium.
    pub fn with_medium(
        mut medium: Box<dyn SnapshotMedium>,
        codec: SnapshotCodec,
    ) -> Result<Self, StoreError> {
        let (store, committed_sequence, start) = match medium.load()? {
            None => {
                info!(medium = %medium.describe(), "[fe-01] Cold start: empty critical data store");
                (AddressedStore::new(), 0, StartKind::Cold)
            }
            Some(bytes) => {
                let decoded = SnapshotCodec::decode(&bytes).map_err(|source| {
                    StoreError::StoreCorrupt {
                        location: medium.describe(),
                        source,
                    }
                })?;
                info!(
                    medium = %medium.describe(),
                    sequence = decoded.header.sequence,
                    entries = decoded.store.entry_count(),
                    compressed = decoded.header.is_compressed(),
                    "[fe-01] Warm start: restored committed snapshot"
                );
                (decoded.store, decoded.header.sequence, StartKind::Warm)
            }
        };

        Ok(Self {
            store,
            medium,
            codec,
            committed_sequence,
            start,
        })
    }

    pub fn store(&self) -> &AddressedStore {
        &self.store
    }

    /// Mutable access to the working store. Changes are not durable until
    /// the next [`Self::commit`].
    pub fn store_mut(&mut self) -> &mut AddressedStore {
        &mut self.store
    }

    /// Sequence number of the last successful commit (or of the restored
    /// snapshot).
    pub fn committed_sequence(&self) -> u64 {
        self.committed_sequence
    }

    pub fn start_kind(&self) -> StartKind {
        self.start
    }

    pub fn is_durable(&self) -> bool {
        self.medium.is_durable()
    }

    pub fn describe_medium(&self) -> String {
        self.medium.describe()
    }

    /// Atomically replace the committed snapshot with the working store.
    pub fn commit(&mut self, sequence: u64) -> Result<CommitReceipt, StoreError> {
        if !self.medium.is_durable() {
            self.committed_sequence = sequence;
            return Ok(CommitReceipt {
                sequence,
                bytes: 0,
                compressed: false,
            });
        }

        let frame = self.codec.encode(&self.store, sequence)?;
        self.medium.stage(&frame)?;
        self.medium.promote()?;
        self.committed_sequence = sequence;

        debug!(
            sequence,
            bytes = frame.len(),
            compressed = self.codec.compresses(),
            "Snapshot committed"
        );
        Ok(CommitReceipt {
            sequence,
            bytes: frame.len(),
            compressed: self.codec.compresses(),
        })
    }
}
