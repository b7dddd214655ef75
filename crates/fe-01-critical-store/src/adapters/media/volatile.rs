use crate::domain::errors::StoreError;
use crate::ports::outbound::SnapshotMedium;

/// Medium for throwaway sessions: nothing is ever persisted.
#[derive(Debug, Default)]
pub struct VolatileMedium;

impl SnapshotMedium for VolatileMedium {
    fn load(&mut self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    fn stage(&mut self, _frame: &[u8]) -> Result<(), StoreError> {
        Ok(())
    }

    fn promote(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
