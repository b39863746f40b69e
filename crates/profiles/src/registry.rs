use crate::builtin::{quality_oriented, value_oriented};
use crate::error::ProfileError;
use crate::factory::build_profile;
use crate::profile::InvestorProfile;
use configuration::{Config, Thresholds};

/// The set of investor profiles known to the application, in registration order.
///
/// Profiles are data: adding one means registering it here, never changing the
/// engine. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<InvestorProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in value and quality profiles.
    pub fn with_builtin(thresholds: &Thresholds) -> Self {
        Self {
            profiles: vec![value_oriented(thresholds), quality_oriented(thresholds)],
        }
    }

    /// Built-in profiles followed by every `[[profiles]]` entry of the configuration.
    pub fn from_config(config: &Config) -> Result<Self, ProfileError> {
        let mut registry = Self::with_builtin(&config.thresholds);
        for definition in &config.profiles {
            registry.register(build_profile(definition, &config.thresholds)?)?;
        }
        Ok(registry)
    }

    /// Adds a profile after checking that it is valid and its name is free.
    pub fn register(&mut self, profile: InvestorProfile) -> Result<(), ProfileError> {
        profile.validate()?;
        if self.get(profile.name()).is_some() {
            return Err(ProfileError::DuplicateProfile(profile.name().to_string()));
        }

        tracing::debug!(profile = profile.name(), "Registered investor profile");
        self.profiles.push(profile);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&InvestorProfile> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    pub fn resolve(&self, name: &str) -> Result<&InvestorProfile, ProfileError> {
        self.get(name)
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
    }

    /// Resolves a selection of profile names. An empty selection means all profiles.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&InvestorProfile>, ProfileError> {
        if names.is_empty() {
            return Ok(self.profiles.iter().collect());
        }
        names.iter().map(|name| self.resolve(name.as_ref())).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InvestorProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{QUALITY_PROFILE, VALUE_PROFILE};
    use configuration::load_config_from_str;
    use core_types::CriterionKind;
    use criteria::Criterion;
    use rust_decimal_macros::dec;

    #[test]
    fn builtin_profiles_are_registered_in_order() {
        let registry = ProfileRegistry::with_builtin(&Thresholds::default());
        let names: Vec<_> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![VALUE_PROFILE, QUALITY_PROFILE]);
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = ProfileRegistry::with_builtin(&Thresholds::default());
        assert_eq!(registry.resolve("Quality").unwrap().name(), QUALITY_PROFILE);
        assert!(matches!(
            registry.resolve("growth"),
            Err(ProfileError::UnknownProfile(name)) if name == "growth"
        ));
    }

    #[test]
    fn new_profiles_can_be_registered() {
        let mut registry = ProfileRegistry::with_builtin(&Thresholds::default());
        let profile = InvestorProfile::new("cash", 1)
            .with_criterion(Criterion::new(CriterionKind::FreeCashFlow, dec!(0)));
        registry.register(profile).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.select(&["cash", "value"]).unwrap().len(), 2);
        assert_eq!(registry.select::<&str>(&[]).unwrap().len(), 3);
    }

    #[test]
    fn duplicate_and_invalid_profiles_are_rejected() {
        let mut registry = ProfileRegistry::with_builtin(&Thresholds::default());
        let duplicate = InvestorProfile::new("VALUE", 0)
            .with_criterion(Criterion::new(CriterionKind::FreeCashFlow, dec!(0)));
        assert!(matches!(
            registry.register(duplicate),
            Err(ProfileError::DuplicateProfile(_))
        ));

        let empty = InvestorProfile::new("empty", 0);
        assert!(matches!(registry.register(empty), Err(ProfileError::Invalid { .. })));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn configured_profiles_follow_builtin_ones() {
        let config = load_config_from_str(
            r#"
            [[profiles]]
            name = "margins"
            pass_threshold = 2
            criteria = [{ kind = "operating_margin" }, { kind = "profit_margin" }]
            "#,
        )
        .unwrap();
        let registry = ProfileRegistry::from_config(&config).unwrap();
        let names: Vec<_> = registry.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec![VALUE_PROFILE, QUALITY_PROFILE, "margins"]);
    }
}
