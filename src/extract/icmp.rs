//! ICMP extraction rule.

use crate::dissect::{Dissection, HeaderKind};
use crate::record::{FieldMap, FieldValue};

use super::rule::ExtractRule;

/// ICMP extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct IcmpRule;

impl ExtractRule for IcmpRule {
    fn kind(&self) -> HeaderKind {
        HeaderKind::Icmp
    }

    fn extract(&mut self, dissection: &Dissection<'_>, fields: &mut FieldMap) {
        let Some(icmp) = &dissection.icmp else {
            return;
        };

        fields.insert(
            "typeDescription",
            FieldValue::text(icmp.type_description()),
        );
    }
}
