use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Descriptive, read-only content shown alongside a calculator.
///
/// Every field is optional; calculators fill in what they have.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatorContent {
    #[serde(default)]
    pub when_to_use: Vec<String>,
    #[serde(default)]
    pub pearls: Vec<String>,
    pub why_use: Option<String>,
    pub next_steps: Option<NextSteps>,
    pub evidence: Option<EvidenceContent>,
    pub creator_insights: Option<String>,
    pub creator: Option<Creator>,
    #[serde(default)]
    pub contributors: Vec<String>,
    /// Ids of related calculators. May reference ids absent from the catalog.
    #[serde(default)]
    pub related_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Creator {
    pub name: String,
    pub title: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LiteratureKind {
    Original,
    Validation,
    Outcomes,
    Guideline,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LiteratureItem {
    pub kind: LiteratureKind,
    pub title: String,
    pub citation: String,
    pub pubmed_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NextSteps {
    #[serde(default)]
    pub advice: Vec<String>,
    #[serde(default)]
    pub management: Vec<ManagementSection>,
    pub critical_actions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ManagementSection {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvidenceContent {
    #[serde(default)]
    pub formula: Vec<FormulaRow>,
    #[serde(default)]
    pub facts_figures: Vec<FactsFiguresRow>,
    #[serde(default)]
    pub appraisal: Vec<String>,
    #[serde(default)]
    pub literature: Vec<LiteratureItem>,
}

/// One criterion of the published point table.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FormulaRow {
    pub criteria: String,
    #[serde(default)]
    pub sub_criteria: Vec<SubCriterion>,
    pub points: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubCriterion {
    pub label: String,
    pub points: String,
}

/// One row of the score-to-outcome table from the validation literature.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FactsFiguresRow {
    pub score: u32,
    pub ischemic_risk: Option<String>,
    pub total_risk: Option<String>,
    pub survival_5yr: Option<String>,
    pub survival_10yr: Option<String>,
}

impl CalculatorContent {
    /// Literature entries of one kind, in catalog order.
    pub fn literature_of(&self, kind: LiteratureKind) -> impl Iterator<Item = &LiteratureItem> {
        self.evidence
            .iter()
            .flat_map(|e| e.literature.iter())
            .filter(move |item| item.kind == kind)
    }
}
