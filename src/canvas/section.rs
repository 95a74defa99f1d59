//! Section identifiers and their grouping
//!
//! The canvas is a fixed set of 18 sections known at build time. The serde
//! string form of each variant doubles as the JSON key in saved documents.

use serde::{Deserialize, Serialize};

/// The five themed panels of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionGroup {
    Governance,
    Discover,
    Design,
    Deliver,
    ValueAnchor,
}

/// Identifier of a single canvas section
///
/// Closed set: the canvas never grows sections at runtime, so callers can
/// pass ids around without an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    // Governance spine
    GovRegulatory,
    GovClinical,
    GovData,
    GovTech,
    // Discover phase
    DiscChallenge,
    DiscUsers,
    DiscStakeholders,
    // Design phase
    DesArch,
    DesUx,
    DesIntegration,
    // Deliver phase
    DelEvidence,
    DelScale,
    DelBusiness,
    // Value anchor outcomes
    ValEquity,
    ValPopulation,
    ValPatient,
    ValProvider,
    ValCost,
}

/// Number of sections on the canvas
pub const SECTION_COUNT: usize = 18;

impl SectionId {
    /// Every section id in canonical (display) order
    pub const ALL: [SectionId; SECTION_COUNT] = [
        SectionId::GovRegulatory,
        SectionId::GovClinical,
        SectionId::GovData,
        SectionId::GovTech,
        SectionId::DiscChallenge,
        SectionId::DiscUsers,
        SectionId::DiscStakeholders,
        SectionId::DesArch,
        SectionId::DesUx,
        SectionId::DesIntegration,
        SectionId::DelEvidence,
        SectionId::DelScale,
        SectionId::DelBusiness,
        SectionId::ValEquity,
        SectionId::ValPopulation,
        SectionId::ValPatient,
        SectionId::ValProvider,
        SectionId::ValCost,
    ];

    /// The JSON/storage key for this section
    pub fn as_key(self) -> &'static str {
        match self {
            SectionId::GovRegulatory => "gov_regulatory",
            SectionId::GovClinical => "gov_clinical",
            SectionId::GovData => "gov_data",
            SectionId::GovTech => "gov_tech",
            SectionId::DiscChallenge => "disc_challenge",
            SectionId::DiscUsers => "disc_users",
            SectionId::DiscStakeholders => "disc_stakeholders",
            SectionId::DesArch => "des_arch",
            SectionId::DesUx => "des_ux",
            SectionId::DesIntegration => "des_integration",
            SectionId::DelEvidence => "del_evidence",
            SectionId::DelScale => "del_scale",
            SectionId::DelBusiness => "del_business",
            SectionId::ValEquity => "val_equity",
            SectionId::ValPopulation => "val_population",
            SectionId::ValPatient => "val_patient",
            SectionId::ValProvider => "val_provider",
            SectionId::ValCost => "val_cost",
        }
    }

    /// Parse a JSON/storage key; `None` for keys the canvas does not know
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "gov_regulatory" => Some(SectionId::GovRegulatory),
            "gov_clinical" => Some(SectionId::GovClinical),
            "gov_data" => Some(SectionId::GovData),
            "gov_tech" => Some(SectionId::GovTech),
            "disc_challenge" => Some(SectionId::DiscChallenge),
            "disc_users" => Some(SectionId::DiscUsers),
            "disc_stakeholders" => Some(SectionId::DiscStakeholders),
            "des_arch" => Some(SectionId::DesArch),
            "des_ux" => Some(SectionId::DesUx),
            "des_integration" => Some(SectionId::DesIntegration),
            "del_evidence" => Some(SectionId::DelEvidence),
            "del_scale" => Some(SectionId::DelScale),
            "del_business" => Some(SectionId::DelBusiness),
            "val_equity" => Some(SectionId::ValEquity),
            "val_population" => Some(SectionId::ValPopulation),
            "val_patient" => Some(SectionId::ValPatient),
            "val_provider" => Some(SectionId::ValProvider),
            "val_cost" => Some(SectionId::ValCost),
            _ => None,
        }
    }

    /// The panel this section belongs to
    pub fn group(self) -> SectionGroup {
        match self {
            SectionId::GovRegulatory
            | SectionId::GovClinical
            | SectionId::GovData
            | SectionId::GovTech => SectionGroup::Governance,
            SectionId::DiscChallenge | SectionId::DiscUsers | SectionId::DiscStakeholders => {
                SectionGroup::Discover
            }
            SectionId::DesArch | SectionId::DesUx | SectionId::DesIntegration => {
                SectionGroup::Design
            }
            SectionId::DelEvidence | SectionId::DelScale | SectionId::DelBusiness => {
                SectionGroup::Deliver
            }
            SectionId::ValEquity
            | SectionId::ValPopulation
            | SectionId::ValPatient
            | SectionId::ValProvider
            | SectionId::ValCost => SectionGroup::ValueAnchor,
        }
    }
}
