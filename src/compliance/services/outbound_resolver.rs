use crate::compliance::domain::{
    LicenseSet, OutboundCandidate, OutboundReport, PairVerdict, Verdict,
};
use std::collections::{BTreeSet, HashMap};

/// An (inbound, outbound) pair that needs a verdict
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LicensePair {
    pub inbound: String,
    pub outbound: String,
}

/// OutboundResolver picks the outbound licenses every inbound license is
/// compatible with.
///
/// Resolution runs in two steps so the service stays free of I/O:
/// `pairs` lists what has to be evaluated, the caller asks the evaluator,
/// then `resolve` turns the verdicts into a report.
pub struct OutboundResolver;

impl OutboundResolver {
    /// Candidate outbound licenses: every license of the set plus `extra`,
    /// sorted and deduplicated. Empty when the set is empty.
    pub fn candidates(set: &LicenseSet, extra: &[String]) -> Vec<String> {
        if set.is_empty() {
            return Vec::new();
        }
        set.licenses()
            .map(str::to_string)
            .chain(
                extra
                    .iter()
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty()),
            )
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every ordered (inbound, candidate) pair of distinct licenses, each once
    pub fn pairs(set: &LicenseSet, extra: &[String]) -> Vec<LicensePair> {
        let mut pairs = Vec::new();
        for outbound in Self::candidates(set, extra) {
            for inbound in set.licenses().filter(|i| *i != outbound) {
                pairs.push(LicensePair {
                    inbound: inbound.to_string(),
                    outbound: outbound.clone(),
                });
            }
        }
        pairs
    }

    /// Builds the report from evaluated pairs.
    ///
    /// A candidate is kept when none of its verdicts is `incompatible`. Pairs
    /// missing from `verdicts` count as `unknown`.
    pub fn resolve(
        set: &LicenseSet,
        extra: &[String],
        verdicts: &HashMap<LicensePair, Verdict>,
    ) -> OutboundReport {
        let mut report = OutboundReport {
            licenses: set.licenses().map(str::to_string).collect(),
            ..Default::default()
        };

        for outbound in Self::candidates(set, extra) {
            let column: Vec<PairVerdict> = set
                .licenses()
                .filter(|i| *i != outbound)
                .map(|inbound| {
                    let pair = LicensePair {
                        inbound: inbound.to_string(),
                        outbound: outbound.clone(),
                    };
                    let verdict = verdicts.get(&pair).copied().unwrap_or(Verdict::Unknown);
                    PairVerdict {
                        inbound: pair.inbound,
                        outbound: pair.outbound,
                        verdict,
                    }
                })
                .collect();

            if column.iter().all(|v| v.verdict.permits()) {
                report.candidates.push(OutboundCandidate {
                    license: outbound.clone(),
                    has_unknown: column.iter().any(|v| v.verdict == Verdict::Unknown),
                    verdicts: column.clone(),
                });
            }
            report.matrix.extend(column);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(licenses: &[&str]) -> LicenseSet {
        let mut set = LicenseSet::new();
        for license in licenses {
            set.add_license(license.to_string());
        }
        set
    }

    fn verdict_map(entries: &[(&str, &str, Verdict)]) -> HashMap<LicensePair, Verdict> {
        entries
            .iter()
            .map(|(inbound, outbound, verdict)| {
                (
                    LicensePair {
                        inbound: inbound.to_string(),
                        outbound: outbound.to_string(),
                    },
                    *verdict,
                )
            })
            .collect()
    }

    #[test]
    fn test_pairs_cover_every_ordered_pair_once() {
        let set = set_of(&["Apache-2.0", "MIT", "GPL-3.0-only"]);
        let pairs = OutboundResolver::pairs(&set, &[]);

        assert_eq!(pairs.len(), 6);
        let unique: std::collections::HashSet<_> = pairs.iter().collect();
        assert_eq!(unique.len(), 6);
        assert!(pairs.iter().all(|p| p.inbound != p.outbound));
    }

    #[test]
    fn test_pairs_include_extra_candidates() {
        let set = set_of(&["MIT"]);
        let pairs = OutboundResolver::pairs(&set, &["Apache-2.0".to_string()]);

        assert_eq!(
            pairs,
            vec![LicensePair {
                inbound: "MIT".to_string(),
                outbound: "Apache-2.0".to_string()
            }]
        );
    }

    #[test]
    fn test_resolve_picks_compatible_candidate() {
        let set = set_of(&["GPL-3.0-only", "MIT"]);
        let verdicts = verdict_map(&[
            ("MIT", "GPL-3.0-only", Verdict::Compatible),
            ("GPL-3.0-only", "MIT", Verdict::Incompatible),
        ]);

        let report = OutboundResolver::resolve(&set, &[], &verdicts);

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].license, "GPL-3.0-only");
        assert!(!report.candidates[0].has_unknown);
        assert_eq!(report.matrix.len(), 2);
    }

    #[test]
    fn test_resolve_flags_unknown_verdicts() {
        let set = set_of(&["Apache-2.0", "MIT"]);
        let verdicts = verdict_map(&[
            ("MIT", "Apache-2.0", Verdict::Unknown),
            ("Apache-2.0", "MIT", Verdict::Incompatible),
        ]);

        let report = OutboundResolver::resolve(&set, &[], &verdicts);

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].license, "Apache-2.0");
        assert!(report.candidates[0].has_unknown);
    }

    #[test]
    fn test_resolve_no_candidate_keeps_matrix() {
        let set = set_of(&["GPL-2.0-only", "Apache-2.0"]);
        let verdicts = verdict_map(&[
            ("GPL-2.0-only", "Apache-2.0", Verdict::Incompatible),
            ("Apache-2.0", "GPL-2.0-only", Verdict::Incompatible),
        ]);

        let report = OutboundResolver::resolve(&set, &[], &verdicts);

        assert!(!report.has_candidates());
        assert_eq!(report.matrix.len(), 2);
    }

    #[test]
    fn test_resolve_candidates_sorted() {
        let set = set_of(&["MIT", "BSD-3-Clause", "Apache-2.0"]);
        let report = OutboundResolver::resolve(&set, &[], &HashMap::new());

        let names: Vec<_> = report.candidates.iter().map(|c| c.license.as_str()).collect();
        assert_eq!(names, ["Apache-2.0", "BSD-3-Clause", "MIT"]);
        // verdicts that were never evaluated count as unknown
        assert!(report.candidates.iter().all(|c| c.has_unknown));
    }

    #[test]
    fn test_resolve_empty_set() {
        let report = OutboundResolver::resolve(
            &LicenseSet::new(),
            &["MIT".to_string()],
            &HashMap::new(),
        );
        assert!(report.candidates.is_empty());
        assert!(report.matrix.is_empty());
        assert!(report.licenses.is_empty());
    }

    #[test]
    fn test_resolve_single_license() {
        let set = set_of(&["MIT"]);
        let report = OutboundResolver::resolve(&set, &[], &HashMap::new());

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.candidates[0].license, "MIT");
        assert!(report.candidates[0].verdicts.is_empty());
        assert!(report.matrix.is_empty());
    }
}
