//! Static canvas configuration
//!
//! Display data for the rendering layer: panel titles, section titles,
//! facilitation prompts. Pure data, no behavior; editing it never changes
//! core semantics.

use crate::canvas::{SectionGroup, SectionId};

/// Display definition of one section card
#[derive(Debug, Clone, Copy)]
pub struct SectionConfig {
    pub id: SectionId,
    pub title: &'static str,
    /// One-line framing shown under the title
    pub instruction: &'static str,
    /// Facilitation prompts listed on the card
    pub prompts: &'static [&'static str],
}

/// Display definition of one themed panel
#[derive(Debug, Clone, Copy)]
pub struct GroupConfig {
    pub group: SectionGroup,
    pub title: &'static str,
    /// Short tag shown in the panel header
    pub badge: &'static str,
    pub footer: Option<&'static str>,
    pub sections: &'static [SectionConfig],
}

/// The five panels in display order
pub const GROUPS: [GroupConfig; 5] = [
    GroupConfig {
        group: SectionGroup::Governance,
        title: "GOVERNANCE SPINE — Safety, Compliance & Technology Framework",
        badge: "GOVERNANCE",
        footer: None,
        sections: &[
            SectionConfig {
                id: SectionId::GovRegulatory,
                title: "Regulatory Pathway",
                instruction: "Compliance with laws and standards.",
                prompts: &["BPOM Classification", "Sandbox", "TKDN", "ISO 13485"],
            },
            SectionConfig {
                id: SectionId::GovClinical,
                title: "Clinical Governance",
                instruction: "Patient safety and clinical quality.",
                prompts: &["Protocols", "Patient Safety", "Adverse Events", "PNPK"],
            },
            SectionConfig {
                id: SectionId::GovData,
                title: "Data Governance",
                instruction: "Privacy and data protection.",
                prompts: &["UU PDP", "PP 71/2019", "Consent", "Security Standards"],
            },
            SectionConfig {
                id: SectionId::GovTech,
                title: "Technology Governance",
                instruction: "System reliability and security.",
                prompts: &["Architecture", "Cybersecurity", "API", "DR/BC"],
            },
        ],
    },
    GroupConfig {
        group: SectionGroup::Discover,
        title: "DISCOVER",
        badge: "PHASE 1",
        footer: Some("Mindset: Design Thinking – Empathy & Problem Definition"),
        sections: &[
            SectionConfig {
                id: SectionId::DiscChallenge,
                title: "1. HEALTH CHALLENGE",
                instruction: "Problem identification.",
                prompts: &[
                    "Health problem & epidemiological data?",
                    "Mechanism of action?",
                    "Barriers to solution?",
                    "Renstra Kemenkes/SDGs alignment?",
                ],
            },
            SectionConfig {
                id: SectionId::DiscUsers,
                title: "2. USER PROFILES",
                instruction: "Understanding your users.",
                prompts: &[
                    "Primary users (Patients, Providers)?",
                    "Demographics & digital literacy?",
                    "Behaviors & motivations?",
                    "Urban/rural & BPJS context?",
                ],
            },
            SectionConfig {
                id: SectionId::DiscStakeholders,
                title: "3. STAKEHOLDER MAP",
                instruction: "Mapping the ecosystem.",
                prompts: &[
                    "Government (Kemenkes, BPOM)?",
                    "Clinical & Professional orgs?",
                    "Payers (BPJS, Insurance)?",
                    "Industry & Academic partners?",
                ],
            },
        ],
    },
    GroupConfig {
        group: SectionGroup::Design,
        title: "DESIGN",
        badge: "PHASE 2",
        footer: Some("Mindset: Human-Centered Design – User Research"),
        sections: &[
            SectionConfig {
                id: SectionId::DesArch,
                title: "4. SOLUTION ARCHITECTURE",
                instruction: "Solution technical framework.",
                prompts: &[
                    "Pillar (Medicine, Dx, Tx, Wellness)?",
                    "Risk classification (Class I-III)?",
                    "SaMD or hardware-integrated?",
                    "Digital biomarkers?",
                ],
            },
            SectionConfig {
                id: SectionId::DesUx,
                title: "5. USER EXPERIENCE",
                instruction: "Designing for usability.",
                prompts: &[
                    "Core features?",
                    "Usability (Nielsen, SUS)?",
                    "Accessibility (Bahasa, Offline)?",
                    "Engagement strategy?",
                ],
            },
            SectionConfig {
                id: SectionId::DesIntegration,
                title: "6. SATUSEHAT INTEGRATION",
                instruction: "Interoperability and national ecosystem.",
                prompts: &[
                    "Integration approach?",
                    "FHIR resources?",
                    "HL7 standards?",
                    "SIMRS/Pcare interoperability?",
                ],
            },
        ],
    },
    GroupConfig {
        group: SectionGroup::Deliver,
        title: "DELIVER",
        badge: "PHASE 3",
        footer: Some("Mindset: Dual Framework – Strategy + Reality"),
        sections: &[
            SectionConfig {
                id: SectionId::DelEvidence,
                title: "7. EVIDENCE PLAN",
                instruction: "Validation and efficacy.",
                prompts: &[
                    "Pathway (Pilot → RCT → RWE)?",
                    "Clinical endpoints?",
                    "Study design & sample size?",
                    "Cost-effectiveness metrics?",
                ],
            },
            SectionConfig {
                id: SectionId::DelScale,
                title: "8. SCALE STRATEGY",
                instruction: "Growth and adoption.",
                prompts: &[
                    "Go-to-market strategy?",
                    "Pilot sites (Hospitals, Puskesmas)?",
                    "Change management?",
                    "National scale pathway?",
                ],
            },
            SectionConfig {
                id: SectionId::DelBusiness,
                title: "9. BUSINESS MODEL",
                instruction: "Sustainability and finance.",
                prompts: &[
                    "Revenue model (B2B, B2C, B2G)?",
                    "BPJS reimbursement?",
                    "Private insurance strategy?",
                    "Unit economics?",
                ],
            },
        ],
    },
    GroupConfig {
        group: SectionGroup::ValueAnchor,
        title: "VALUE ANCHOR — Quintuple Aim Outcomes",
        badge: "OUTCOMES",
        footer: None,
        sections: &[
            SectionConfig {
                id: SectionId::ValEquity,
                title: "Health Equity",
                instruction: "How does this reduce healthcare disparities?",
                prompts: &["Accessible care for all", "Disparity reduction?"],
            },
            SectionConfig {
                id: SectionId::ValPopulation,
                title: "Population Health",
                instruction: "What clinical outcomes will improve at the population level?",
                prompts: &["Better outcomes at scale", "Clinical improvements?"],
            },
            SectionConfig {
                id: SectionId::ValPatient,
                title: "Patient Experience",
                instruction: "How will patient satisfaction and engagement increase?",
                prompts: &["Satisfaction & engagement", "Patient journey impact?"],
            },
            SectionConfig {
                id: SectionId::ValProvider,
                title: "Provider Satisfaction",
                instruction: "How will this improve clinician workflow and reduce burden?",
                prompts: &["Clinician well-being", "Workflow optimization?"],
            },
            SectionConfig {
                id: SectionId::ValCost,
                title: "Cost Reduction",
                instruction: "What efficiency gains are expected?",
                prompts: &["Efficiency gains", "Economic optimization?"],
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SECTION_COUNT;

    #[test]
    fn test_groups_cover_every_section_once() {
        let mut ids: Vec<SectionId> = GROUPS
            .iter()
            .flat_map(|g| g.sections.iter().map(|s| s.id))
            .collect();
        assert_eq!(ids.len(), SECTION_COUNT);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SECTION_COUNT);
    }

    #[test]
    fn test_sections_sit_in_their_group() {
        for group in &GROUPS {
            for section in group.sections {
                assert_eq!(section.id.group(), group.group);
            }
        }
    }

    #[test]
    fn test_every_section_has_prompts() {
        for group in &GROUPS {
            for section in group.sections {
                assert!(!section.title.is_empty());
                assert!(!section.prompts.is_empty());
            }
        }
    }
}
