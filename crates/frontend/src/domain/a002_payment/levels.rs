//! Bank cascade of the payment popup: organization → bank → branch

use crate::shared::cascade::source::segment;
use crate::shared::cascade::{EntityKind, HttpOptionSource, LevelSpec, OptionSource};
use std::sync::Arc;

pub const ORGANIZATION: usize = 0;
pub const BANK: usize = 1;
pub const BRANCH: usize = 2;

pub const BANK_LEVELS: &[LevelSpec] = &[
    LevelSpec {
        key: "organization",
        title: "Organization",
        kind: EntityKind::Organization,
        parents: &[],
        required: true,
        payload_key: "organizationId",
        saved_id_keys: &["organizationId", "orgId"],
        saved_label_keys: &["organizationName", "orgName"],
    },
    LevelSpec {
        key: "bank",
        title: "Bank",
        kind: EntityKind::Bank,
        parents: &[ORGANIZATION],
        required: true,
        payload_key: "bankId",
        saved_id_keys: &["bankId"],
        saved_label_keys: &["bankName"],
    },
    LevelSpec {
        key: "bankBranch",
        title: "Bank branch",
        kind: EntityKind::BankBranch,
        parents: &[BANK],
        required: true,
        payload_key: "bankBranchId",
        saved_id_keys: &["bankBranchId", "branchIfsc"],
        saved_label_keys: &["bankBranchName"],
    },
];

pub fn bank_sources() -> Vec<Arc<dyn OptionSource>> {
    let organizations: Arc<dyn OptionSource> =
        Arc::new(HttpOptionSource::new(|_| "/api/catalog/organizations".to_string()));
    let banks: Arc<dyn OptionSource> = Arc::new(HttpOptionSource::new(|p| {
        format!("/api/catalog/organizations/{}/banks", segment(p, 0))
    }));
    let branches: Arc<dyn OptionSource> = Arc::new(HttpOptionSource::new(|p| {
        format!("/api/catalog/banks/{}/branches", segment(p, 0))
    }));
    vec![organizations, banks, branches]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::cascade::{CascadeResolver, CascadeSettings};

    #[test]
    fn test_bank_chain_is_valid() {
        let resolver = CascadeResolver::new(BANK_LEVELS, CascadeSettings::default()).unwrap();
        assert_eq!(resolver.len(), bank_sources().len());
        assert_eq!(resolver.level(BRANCH).unwrap().spec().parents, &[BANK]);
    }
}
