//! In-memory claim store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::error::{EngineError, EngineResult};

use super::{CalculationSnapshot, ClaimRecord, ClaimStore, TenantId};

#[derive(Debug)]
struct ClaimEntry {
    record: ClaimRecord,
    snapshots: Vec<CalculationSnapshot>,
}

/// A [`ClaimStore`] backed by a process-local map.
///
/// Replacing a claim's inputs keeps its calculation history.
#[derive(Debug, Default)]
pub struct InMemoryClaimStore {
    claims: RwLock<HashMap<(TenantId, String), ClaimEntry>>,
}

impl InMemoryClaimStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::StoreError {
        message: "claim store lock poisoned".to_string(),
    }
}

fn not_found(claim_id: &str) -> EngineError {
    EngineError::ClaimNotFound {
        claim_id: claim_id.to_string(),
    }
}

impl ClaimStore for InMemoryClaimStore {
    fn put_claim(&self, tenant: &TenantId, claim: ClaimRecord) -> EngineResult<()> {
        let mut claims = self.claims.write().map_err(poisoned)?;
        let key = (tenant.clone(), claim.claim_id.clone());

        match claims.get_mut(&key) {
            Some(entry) => entry.record = claim,
            None => {
                claims.insert(
                    key,
                    ClaimEntry {
                        record: claim,
                        snapshots: Vec::new(),
                    },
                );
            }
        }
        Ok(())
    }

    fn get_claim(&self, tenant: &TenantId, claim_id: &str) -> EngineResult<ClaimRecord> {
        let claims = self.claims.read().map_err(poisoned)?;
        claims
            .get(&(tenant.clone(), claim_id.to_string()))
            .map(|entry| entry.record.clone())
            .ok_or_else(|| not_found(claim_id))
    }

    fn save_snapshot(
        &self,
        tenant: &TenantId,
        snapshot: CalculationSnapshot,
    ) -> EngineResult<()> {
        let mut claims = self.claims.write().map_err(poisoned)?;
        let entry = claims
            .get_mut(&(tenant.clone(), snapshot.claim_id.clone()))
            .ok_or_else(|| not_found(&snapshot.claim_id))?;
        entry.snapshots.push(snapshot);
        Ok(())
    }

    fn snapshots(
        &self,
        tenant: &TenantId,
        claim_id: &str,
    ) -> EngineResult<Vec<CalculationSnapshot>> {
        let claims = self.claims.read().map_err(poisoned)?;
        claims
            .get(&(tenant.clone(), claim_id.to_string()))
            .map(|entry| entry.snapshots.clone())
            .ok_or_else(|| not_found(claim_id))
    }
}
