pub mod record;
pub mod table;

use crate::detect::dmi::{DmiField, IdentitySource, PlatformIdentity};
use crate::error::{Error, Result};
use record::ConfigurationRecord;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info};

/// How a criterion compares its value with the DMI field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-sensitive containment.
    Substring,
    /// Full equality.
    Exact,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCriterion {
    pub field: DmiField,
    pub value: Cow<'static, str>,
    pub mode: MatchMode,
}

impl MatchCriterion {
    pub const fn substring(field: DmiField, value: &'static str) -> Self {
        Self {
            field,
            value: Cow::Borrowed(value),
            mode: MatchMode::Substring,
        }
    }

    pub const fn exact(field: DmiField, value: &'static str) -> Self {
        Self {
            field,
            value: Cow::Borrowed(value),
            mode: MatchMode::Exact,
        }
    }

    /// A field the firmware does not report reads as the empty string.
    pub fn matches(&self, identity: &PlatformIdentity) -> bool {
        let actual = identity.get(self.field).unwrap_or("");
        match self.mode {
            MatchMode::Substring => actual.contains(self.value.as_ref()),
            MatchMode::Exact => actual == self.value,
        }
    }
}

/// One entry of the quirk table: all criteria must hold for `record` to apply.
#[derive(Debug, Clone)]
pub struct ConfigurationRule {
    pub name: Cow<'static, str>,
    pub criteria: Vec<MatchCriterion>,
    pub record: Arc<ConfigurationRecord>,
}

impl ConfigurationRule {
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        criteria: impl Into<Vec<MatchCriterion>>,
        record: Arc<ConfigurationRecord>,
    ) -> Result<Self> {
        let rule = Self {
            name: name.into(),
            criteria: criteria.into(),
            record,
        };
        rule.check()?;
        Ok(rule)
    }

    fn check(&self) -> Result<()> {
        if self.criteria.is_empty() {
            return Err(Error::InvalidRule {
                rule: self.name.to_string(),
            });
        }
        Ok(())
    }

    pub fn matches(&self, identity: &PlatformIdentity) -> bool {
        self.criteria.iter().all(|c| c.matches(identity))
    }
}

/// Reject a table containing any rule without criteria.
pub fn validate_table(rules: &[ConfigurationRule]) -> Result<()> {
    rules.iter().try_for_each(ConfigurationRule::check)
}

/// First rule, in table order, whose criteria all match `identity`.
///
/// Table order is the only tie-break: a generic rule placed before a more
/// specific one sharing its criteria shadows it.
pub fn first_match<'a>(
    identity: &PlatformIdentity,
    rules: &'a [ConfigurationRule],
) -> Result<Option<&'a ConfigurationRule>> {
    validate_table(rules)?;
    Ok(rules.iter().find(|r| r.matches(identity)))
}

/// Select the configuration record for `identity`, or `None` if no rule matches.
pub fn select_configuration(
    identity: &PlatformIdentity,
    rules: &[ConfigurationRule],
) -> Result<Option<Arc<ConfigurationRecord>>> {
    Ok(first_match(identity, rules)?.map(|r| Arc::clone(&r.record)))
}

/// The configuration chosen at startup. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedConfiguration {
    record: Option<Arc<ConfigurationRecord>>,
}

impl SelectedConfiguration {
    /// Read the identity once and run the matcher over `rules`.
    pub fn resolve(source: &impl IdentitySource, rules: &[ConfigurationRule]) -> Result<Self> {
        let identity = source.read_identity();
        let selected = match first_match(&identity, rules)? {
            Some(rule) => {
                info!(rule = %rule.name, device = rule.record.target_device(), "matched quirk rule");
                Some(Arc::clone(&rule.record))
            }
            None => {
                debug!("no quirk rule matches this platform");
                None
            }
        };
        Ok(Self { record: selected })
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Option<&ConfigurationRecord> {
        self.record.as_deref()
    }

    pub fn is_matched(&self) -> bool {
        self.record.is_some()
    }
}

impl From<Option<Arc<ConfigurationRecord>>> for SelectedConfiguration {
    fn from(record: Option<Arc<ConfigurationRecord>>) -> Self {
        Self { record }
    }
}

impl From<ConfigurationRecord> for SelectedConfiguration {
    fn from(record: ConfigurationRecord) -> Self {
        Self {
            record: Some(Arc::new(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::record::Property;
    use super::*;

    fn record(model: &'static str) -> Arc<ConfigurationRecord> {
        const PROPS: &[Property] = &[Property::flag("touchscreen-inverted-y")];
        Arc::new(ConfigurationRecord::new(model, "MSSL1680:00", PROPS, None).unwrap())
    }

    fn identity() -> PlatformIdentity {
        PlatformIdentity::default()
            .with(DmiField::SysVendor, "Insyde")
            .with(DmiField::ProductName, "BayTrail")
            .with(DmiField::BiosVersion, "BayTrail H1D_S806_206")
    }

    #[test]
    fn test_substring_is_containment() {
        let c = MatchCriterion::substring(DmiField::BiosVersion, "H1D_S806_206");
        assert!(c.matches(&identity()));
        let c = MatchCriterion::substring(DmiField::BiosVersion, "h1d_s806_206");
        assert!(!c.matches(&identity()));
    }

    #[test]
    fn test_substring_is_literal() {
        let id = PlatformIdentity::default().with(DmiField::ProductName, "X98 Plus II");
        assert!(!MatchCriterion::substring(DmiField::ProductName, "X98.*").matches(&id));
        assert!(!MatchCriterion::substring(DmiField::ProductName, "X98 Plus ?I").matches(&id));
        assert!(MatchCriterion::substring(DmiField::ProductName, "Plus").matches(&id));
    }

    #[test]
    fn test_exact_requires_equality() {
        let id = PlatformIdentity::default().with(DmiField::ProductName, "V820w DualOS");
        assert!(!MatchCriterion::exact(DmiField::ProductName, "V820w").matches(&id));
        assert!(MatchCriterion::exact(DmiField::ProductName, "V820w DualOS").matches(&id));
    }

    #[test]
    fn test_absent_field_is_empty_not_wildcard() {
        let id = PlatformIdentity::default().with(DmiField::SysVendor, "Insyde");
        assert!(!MatchCriterion::substring(DmiField::BiosDate, "2017").matches(&id));
        assert!(MatchCriterion::exact(DmiField::BiosDate, "").matches(&id));
        assert!(MatchCriterion::substring(DmiField::BiosDate, "").matches(&id));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = vec![
            ConfigurationRule::new(
                "specific",
                [
                    MatchCriterion::substring(DmiField::SysVendor, "Insyde"),
                    MatchCriterion::substring(DmiField::BiosVersion, "H1D_S806_206"),
                ],
                record("specific"),
            )
            .unwrap(),
            ConfigurationRule::new(
                "generic",
                [MatchCriterion::substring(DmiField::SysVendor, "Insyde")],
                record("generic"),
            )
            .unwrap(),
        ];

        let selected = select_configuration(&identity(), &rules).unwrap().unwrap();
        assert_eq!(selected.model(), "specific");

        let reversed: Vec<_> = rules.iter().rev().cloned().collect();
        let selected = select_configuration(&identity(), &reversed).unwrap().unwrap();
        assert_eq!(selected.model(), "generic");
    }

    #[test]
    fn test_all_criteria_must_match() {
        let rules = vec![
            ConfigurationRule::new(
                "needs-date",
                [
                    MatchCriterion::substring(DmiField::SysVendor, "Insyde"),
                    MatchCriterion::substring(DmiField::BiosDate, "08/18/2017"),
                ],
                record("needs-date"),
            )
            .unwrap(),
        ];
        assert_eq!(select_configuration(&identity(), &rules).unwrap(), None);
    }

    #[test]
    fn test_no_match_is_none() {
        let rules = vec![
            ConfigurationRule::new(
                "other",
                [MatchCriterion::exact(DmiField::SysVendor, "TECLAST")],
                record("other"),
            )
            .unwrap(),
        ];
        assert_eq!(select_configuration(&identity(), &rules).unwrap(), None);
        assert_eq!(select_configuration(&identity(), &[]).unwrap(), None);
    }

    #[test]
    fn test_empty_criteria_rejected() {
        let err = ConfigurationRule::new("empty", Vec::new(), record("empty")).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { ref rule } if rule == "empty"));
    }

    #[test]
    fn test_empty_criteria_in_table_rejected_even_after_a_match() {
        let good = ConfigurationRule::new(
            "good",
            [MatchCriterion::substring(DmiField::SysVendor, "Insyde")],
            record("good"),
        )
        .unwrap();
        let bad = ConfigurationRule {
            name: Cow::Borrowed("bad"),
            criteria: Vec::new(),
            record: record("bad"),
        };
        let err = select_configuration(&identity(), &[good, bad]).unwrap_err();
        assert!(matches!(err, Error::InvalidRule { .. }));
    }

    #[test]
    fn test_selection_is_deterministic() {
        let rules = vec![
            ConfigurationRule::new(
                "a",
                [MatchCriterion::substring(DmiField::ProductName, "Bay")],
                record("a"),
            )
            .unwrap(),
        ];
        let first = select_configuration(&identity(), &rules).unwrap();
        let second = select_configuration(&identity(), &rules).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_from_identity_source() {
        let rules = vec![
            ConfigurationRule::new(
                "a",
                [MatchCriterion::substring(DmiField::ProductName, "Bay")],
                record("a"),
            )
            .unwrap(),
        ];
        let selected = SelectedConfiguration::resolve(&identity(), &rules).unwrap();
        assert!(selected.is_matched());
        assert_eq!(selected.record().unwrap().model(), "a");

        let selected = SelectedConfiguration::resolve(&PlatformIdentity::default(), &rules).unwrap();
        assert!(!selected.is_matched());
    }
}
