use crate::compliance::domain::{LicenseSet, SbomDocument, DISCOVERED_LICENSE_PROPERTY};

/// Values that mean "no license information" rather than a license
const NO_LICENSE_MARKERS: &[&str] = &["NOASSERTION", "NONE"];

/// LicenseAggregator collects the distinct license identifiers used in an SBOM.
///
/// Every declared license value and every discovered-license property is parsed
/// as an SPDX expression in lax mode (lower-case operators, `/` as OR and
/// common imprecise names are accepted). Compound expressions are flattened
/// into their atomic requirements, e.g. `MIT OR (Apache-2.0 AND GPL-2.0+)`
/// yields `Apache-2.0`, `GPL-2.0+` and `MIT`.
pub struct LicenseAggregator;

impl LicenseAggregator {
    pub fn aggregate(document: &SbomDocument) -> LicenseSet {
        let mut set = LicenseSet::new();

        for component in document.components() {
            let mut values: Vec<String> = component
                .license_values()
                .into_iter()
                .map(|v| v.as_str().to_string())
                .collect();
            if let Some(discovered) = component.property(DISCOVERED_LICENSE_PROPERTY) {
                values.push(discovered.to_string());
            }

            let values: Vec<String> = values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty() && !is_no_license_marker(v))
                .collect();

            if values.is_empty() {
                set.add_empty();
                continue;
            }

            for value in values {
                Self::add_expression(&mut set, value);
            }
        }

        set
    }

    /// Splits one license value into atomic requirements and adds them to `set`
    fn add_expression(set: &mut LicenseSet, value: String) {
        match spdx::Expression::parse_mode(&value, spdx::ParseMode::LAX) {
            Ok(expression) => {
                for requirement in expression.requirements() {
                    set.add_license(requirement.req.to_string());
                }
            }
            Err(e) => {
                tracing::debug!(value = %value, error = %e, "license value is not an SPDX expression");
                set.add_unparseable(value);
            }
        }
    }
}

fn is_no_license_marker(value: &str) -> bool {
    NO_LICENSE_MARKERS
        .iter()
        .any(|marker| value.eq_ignore_ascii_case(marker))
}
