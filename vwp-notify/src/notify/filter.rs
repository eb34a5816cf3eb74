//! Rule filter evaluation
//!
//! Pure predicates, no IO. The dispatch pipeline runs these over every
//! enabled rule before any resolution work starts.

use vwp_common::{IncidentEvent, NotificationRule, RuleFilter};

/// Whether `rule` applies to `incident`.
///
/// The rule-level organization scope is a hard tenant boundary evaluated
/// before any filter dimension: a scoped rule never sees another
/// organization's incidents, however permissive its filter is.
pub fn rule_matches(rule: &NotificationRule, incident: &IncidentEvent) -> bool {
    if let Some(org_id) = rule.organization_id {
        if incident.organization_id != Some(org_id) {
            return false;
        }
    }
    filter_matches(&rule.filter, incident)
}

/// Soft filter dimensions, ANDed together.
///
/// An empty dimension matches everything. A non-empty dimension requires
/// membership, so an incident without the field (discipline may be absent)
/// fails that dimension.
pub fn filter_matches(filter: &RuleFilter, incident: &IncidentEvent) -> bool {
    if !filter.severity.is_empty() && !filter.severity.contains(&incident.severity) {
        return false;
    }

    if !filter.category.is_empty() && !filter.category.contains(&incident.category) {
        return false;
    }

    if !filter.discipline.is_empty() {
        match &incident.discipline {
            Some(discipline) if filter.discipline.contains(discipline) => {}
            _ => return false,
        }
    }

    if let Some(org_id) = filter.organization_id {
        if incident.organization_id != Some(org_id) {
            return false;
        }
    }

    if let Some(project_id) = filter.project_id {
        if incident.project_id != Some(project_id) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use vwp_common::{Channel, RecipientDescriptor, Severity};

    fn incident() -> IncidentEvent {
        IncidentEvent {
            id: 42,
            incident_code: "INC-2026-0042".to_string(),
            title: "Kabel geraakt bij graafwerk".to_string(),
            severity: Severity::Critical,
            category: "graafschade".to_string(),
            discipline: None,
            location: Some("Rijnstraat 8, Den Haag".to_string()),
            organization_id: Some(3),
            project_id: Some(17),
        }
    }

    fn rule_with(filter: RuleFilter, organization_id: Option<i64>) -> NotificationRule {
        NotificationRule {
            id: 1,
            name: "test rule".to_string(),
            recipient: RecipientDescriptor::User {
                user_id: "u1".to_string(),
            },
            channels: BTreeSet::from([Channel::InApp]),
            filter,
            organization_id,
            enabled: true,
        }
    }

    #[test]
    fn empty_filter_matches_every_incident() {
        assert!(rule_matches(&rule_with(RuleFilter::default(), None), &incident()));
    }

    #[test]
    fn severity_dimension_requires_membership() {
        let mut filter = RuleFilter::default();
        filter.severity = BTreeSet::from([Severity::Critical, Severity::High]);
        assert!(filter_matches(&filter, &incident()));

        filter.severity = BTreeSet::from([Severity::Low]);
        assert!(!filter_matches(&filter, &incident()));
    }

    #[test]
    fn category_dimension_requires_membership() {
        let mut filter = RuleFilter::default();
        filter.category = BTreeSet::from(["graafschade".to_string()]);
        assert!(filter_matches(&filter, &incident()));

        filter.category = BTreeSet::from(["valgevaar".to_string()]);
        assert!(!filter_matches(&filter, &incident()));
    }

    #[test]
    fn non_empty_discipline_filter_fails_on_absent_discipline() {
        let mut filter = RuleFilter::default();
        filter.discipline = BTreeSet::from(["Elektra".to_string()]);

        // incident() has no discipline
        assert!(!filter_matches(&filter, &incident()));

        let mut with_discipline = incident();
        with_discipline.discipline = Some("Elektra".to_string());
        assert!(filter_matches(&filter, &with_discipline));
    }

    #[test]
    fn organization_pin_is_exact() {
        let mut filter = RuleFilter::default();
        filter.organization_id = Some(3);
        assert!(filter_matches(&filter, &incident()));

        filter.organization_id = Some(4);
        assert!(!filter_matches(&filter, &incident()));

        // An incident without an organization fails a pinned filter
        let mut orphan = incident();
        orphan.organization_id = None;
        filter.organization_id = Some(3);
        assert!(!filter_matches(&filter, &orphan));
    }

    #[test]
    fn project_pin_is_exact() {
        let mut filter = RuleFilter::default();
        filter.project_id = Some(17);
        assert!(filter_matches(&filter, &incident()));

        filter.project_id = Some(18);
        assert!(!filter_matches(&filter, &incident()));
    }

    #[test]
    fn all_dimensions_must_pass() {
        let mut filter = RuleFilter::default();
        filter.severity = BTreeSet::from([Severity::Critical]);
        filter.category = BTreeSet::from(["valgevaar".to_string()]);

        // severity passes, category fails
        assert!(!filter_matches(&filter, &incident()));
    }

    #[test]
    fn tenant_scope_excludes_before_filter_evaluation() {
        // Entirely permissive filter, mismatched tenant scope
        let rule = rule_with(RuleFilter::default(), Some(9));
        assert!(!rule_matches(&rule, &incident()));

        // Matching tenant scope falls through to the (empty) filter
        let rule = rule_with(RuleFilter::default(), Some(3));
        assert!(rule_matches(&rule, &incident()));
    }

    #[test]
    fn tenant_scope_fails_incident_without_organization() {
        let mut orphan = incident();
        orphan.organization_id = None;
        let rule = rule_with(RuleFilter::default(), Some(3));
        assert!(!rule_matches(&rule, &orphan));
    }
}
