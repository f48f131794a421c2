//! Claim store boundary for the Laytime Calculation Engine.
//!
//! The engine itself never touches storage. This module defines the
//! tenant-scoped store the application shell talks to: it supplies a claim's
//! events and terms and keeps immutable snapshots of every calculation.
//! The tenant is always an explicit argument; there is no ambient tenant state.

mod memory;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::calculate;
use crate::error::EngineResult;
use crate::models::{CalculationResult, SofEvent, TermsConfig};

pub use memory::InMemoryClaimStore;

/// The engine version stamped on every snapshot.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Opaque key scoping every store operation to one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Wraps a tenant identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A claim's calculation inputs as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// The claim identifier, unique within a tenant.
    pub claim_id: String,
    /// The claim's Statement-of-Facts events.
    pub events: Vec<SofEvent>,
    /// The charter-party terms resolved for the claim.
    pub terms: TermsConfig,
}

/// An immutable record of one calculation of a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSnapshot {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// The tenant owning the claim.
    pub tenant_id: TenantId,
    /// The claim the calculation is for.
    pub claim_id: String,
    /// When the calculation was performed.
    pub calculated_at: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The calculation output.
    pub result: CalculationResult,
}

/// Tenant-scoped storage for claims and their calculation history.
///
/// Implementations must treat a claim belonging to another tenant exactly as
/// a missing claim.
pub trait ClaimStore: Send + Sync {
    /// Creates or replaces a claim's inputs.
    fn put_claim(&self, tenant: &TenantId, claim: ClaimRecord) -> EngineResult<()>;

    /// Fetches a claim's inputs.
    fn get_claim(&self, tenant: &TenantId, claim_id: &str) -> EngineResult<ClaimRecord>;

    /// Appends a snapshot to a claim's history.
    fn save_snapshot(&self, tenant: &TenantId, snapshot: CalculationSnapshot)
    -> EngineResult<()>;

    /// Returns a claim's snapshots, oldest first.
    fn snapshots(&self, tenant: &TenantId, claim_id: &str)
    -> EngineResult<Vec<CalculationSnapshot>>;
}

/// Recalculates a stored claim and records the result.
///
/// Nothing is persisted when the calculation fails.
///
/// # Example
///
/// ```
/// use laytime_engine::models::{LaytimeDuration, TermsConfig};
/// use laytime_engine::store::{ClaimRecord, ClaimStore, InMemoryClaimStore, TenantId, recalculate_claim};
/// use rust_decimal::Decimal;
///
/// let store = InMemoryClaimStore::new();
/// let tenant = TenantId::new("tenant_a");
/// store.put_claim(&tenant, ClaimRecord {
///     claim_id: "CLM-001".to_string(),
///     events: vec![],
///     terms: TermsConfig::new(LaytimeDuration::from_days(Decimal::from(4))),
/// }).unwrap();
///
/// let snapshot = recalculate_claim(&store, &tenant, "CLM-001").unwrap();
/// assert_eq!(store.snapshots(&tenant, "CLM-001").unwrap(), vec![snapshot]);
/// ```
pub fn recalculate_claim(
    store: &dyn ClaimStore,
    tenant: &TenantId,
    claim_id: &str,
) -> EngineResult<CalculationSnapshot> {
    let claim = store.get_claim(tenant, claim_id)?;
    let result = calculate(&claim.events, &claim.terms)?;

    let snapshot = CalculationSnapshot {
        calculation_id: Uuid::new_v4(),
        tenant_id: tenant.clone(),
        claim_id: claim.claim_id,
        calculated_at: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        result,
    };
    store.save_snapshot(tenant, snapshot.clone())?;

    Ok(snapshot)
}
