//! The person whose collaborators are being collected.

use std::collections::BTreeSet;

use crate::error::{RosterError, RosterResult};
use crate::name::{self, NormalizedName};

/// Target person and every name form that counts as them.
///
/// Variants are normalized once at construction. Matching is exact key membership: a form
/// of the target's name that was not supplied will show up as a collaborator.
#[derive(Debug, Clone)]
pub struct TargetIdentity {
    display_name: String,
    name: NormalizedName,
    variant_keys: BTreeSet<String>,
}

impl TargetIdentity {
    /// Build a target from its display name and extra accepted variants.
    ///
    /// The display name is always an accepted variant. Variants that normalize to nothing
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the display name has no usable tokens.
    pub fn new<I, S>(display_name: &str, variants: I) -> RosterResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name::normalize(display_name)
            .ok_or_else(|| RosterError::validation("author name", "must contain a name"))?;

        let mut variant_keys = BTreeSet::from([name.key().to_string()]);
        for variant in variants {
            match name::normalize(variant.as_ref()) {
                Some(normalized) => {
                    variant_keys.insert(normalized.key().to_string());
                }
                None => {
                    tracing::debug!(variant = variant.as_ref(), "Ignoring empty name variant");
                }
            }
        }

        Ok(Self { display_name: display_name.trim().to_string(), name, variant_keys })
    }

    /// Parse a semicolon-separated variant list, e.g. `"Erin J Adams;Adams EJ"`.
    #[must_use]
    pub fn split_variants(list: &str) -> Vec<String> {
        list.split(';').map(str::trim).filter(|v| !v.is_empty()).map(String::from).collect()
    }

    /// Name as supplied by the caller.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Normalized form of the display name.
    #[must_use]
    pub const fn name(&self) -> &NormalizedName {
        &self.name
    }

    /// Accepted normalized keys, display name included.
    #[must_use]
    pub const fn variant_keys(&self) -> &BTreeSet<String> {
        &self.variant_keys
    }

    /// Whether a normalized name refers to the target.
    #[must_use]
    pub fn is_target(&self, name: &NormalizedName) -> bool {
        self.variant_keys.contains(name.key())
    }
}
