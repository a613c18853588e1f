//! Skill extraction from the character sheet's node tree.
//!
//! Each usable skill is a link whose `onclick` names a `whichskill=N`
//! description page. A permed skill is followed by a `<b>P</b>` (softcore) or
//! `<b>HP</b>` (hardcore) marker. Skills the character cannot use right now
//! are listed inside `<span id="permskills">` and are skipped.
//!
//! A handful of skills never appear on the sheet at all; they are implied by
//! preferences and added after the walk.

use std::sync::LazyLock;

use im::OrdSet;
use regex::Regex;
use statline_foundation::{Result, SkillCatalog, SkillId, UniqueList};
use statline_markup::{DocumentView, NodeQuery, SelectedNode};
use thiserror::Error;

use crate::context::ParseContext;
use crate::snapshot::SkillSets;

static SKILL_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bwhichskill=(\d+)").expect("skill id pattern is valid"));

/// Container holding skills that cannot be used right now.
pub const LOCKED_SKILLS_CONTAINER: &str = "permskills";

/// Softcore permanence marker.
pub const SOFTCORE_PERM: &str = "P";

/// Hardcore permanence marker.
pub const HARDCORE_PERM: &str = "HP";

/// Something odd in the skill listing. Recorded and skipped.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Anomaly {
    /// A permanence marker with no skill before it.
    #[error("permanence marker '{0}' has no matching skill")]
    StrayMarker(String),
    /// A `<b>` after a skill link that is not a permanence marker.
    #[error("unexpected marker '{0}'")]
    UnexpectedMarker(String),
    /// A node that is neither a skill link nor a marker.
    #[error("unexpected node <{0}>")]
    UnexpectedNode(String),
    /// A skill name the catalog does not know.
    #[error("unresolved skill '{0}'")]
    UnresolvedSkill(String),
}

/// Result of a skill walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillExtraction {
    /// Available and permed skills.
    pub skills: SkillSets,
    /// Anomalies seen along the way, in document order.
    pub anomalies: Vec<Anomaly>,
}

/// Walks a character sheet's skill links and permanence markers.
pub struct SkillSetExtractor<'a, C> {
    catalog: &'a C,
    context: &'a ParseContext,
}

impl<'a, C: SkillCatalog> SkillSetExtractor<'a, C> {
    /// Creates an extractor resolving names through `catalog`.
    #[must_use]
    pub fn new(catalog: &'a C, context: &'a ParseContext) -> Self {
        Self { catalog, context }
    }

    /// The query selecting skill links and their markers.
    #[must_use]
    pub fn query() -> NodeQuery {
        NodeQuery::elements("a")
            .with_attribute_containing("onclick", "whichskill")
            .excluding_within_id(LOCKED_SKILLS_CONTAINER)
            .with_following_sibling("b")
    }

    /// Extracts the skill sets.
    ///
    /// `class_name` is the class parsed from the same sheet; one implied
    /// skill depends on it.
    ///
    /// # Errors
    ///
    /// Returns `StructuralQuery` if the document view fails the query.
    pub fn extract(&self, view: &impl DocumentView, class_name: &str) -> Result<SkillExtraction> {
        let nodes = view.select(&Self::query())?;

        let mut available = UniqueList::new();
        let mut permed = OrdSet::new();
        let mut anomalies = Vec::new();
        let mut current: Option<SkillId> = None;

        for node in &nodes {
            match node.tag.as_str() {
                "a" => {
                    current = self
                        .resolve_link(node, &mut anomalies)
                        .filter(|skill| self.is_listed(*skill));
                    if let Some(skill) = current {
                        available.push(skill);
                    }
                }
                "b" => {
                    let marker = node.text.trim();
                    if marker != SOFTCORE_PERM && marker != HARDCORE_PERM {
                        anomalies.push(Anomaly::UnexpectedMarker(marker.to_string()));
                    } else if let Some(skill) = current.take() {
                        permed.insert(skill);
                    } else {
                        anomalies.push(Anomaly::StrayMarker(marker.to_string()));
                    }
                }
                other => anomalies.push(Anomaly::UnexpectedNode(other.to_string())),
            }
        }

        for name in self.implied_skills(class_name) {
            match self.catalog.skill_id(name) {
                Some(skill) => {
                    available.push(skill);
                }
                None => anomalies.push(Anomaly::UnresolvedSkill(name.to_string())),
            }
        }

        for anomaly in &anomalies {
            tracing::warn!(%anomaly, "skill listing anomaly");
        }
        tracing::debug!(
            available = available.len(),
            permed = permed.len(),
            "extracted skills"
        );

        Ok(SkillExtraction {
            skills: SkillSets { available, permed },
            anomalies,
        })
    }

    fn resolve_link(&self, node: &SelectedNode, anomalies: &mut Vec<Anomaly>) -> Option<SkillId> {
        let onclick = node.attribute("onclick").unwrap_or_default();
        if let Some(id) = SKILL_ID
            .captures(onclick)
            .and_then(|caps| caps[1].parse().ok())
        {
            return Some(SkillId(id));
        }

        tracing::debug!(onclick, "no skill id in link, falling back to name");
        let name = node.text.trim();
        let skill = self.catalog.skill_id(name);
        if skill.is_none() {
            anomalies.push(Anomaly::UnresolvedSkill(name.to_string()));
        }
        skill
    }

    fn is_listed(&self, skill: SkillId) -> bool {
        if skill == SkillId::OLFACTION {
            self.context.allows_olfaction()
        } else if self.catalog.is_bookshelf(skill) {
            self.context.allows_bookshelf_skills()
        } else {
            true
        }
    }

    fn implied_skills(&self, class_name: &str) -> Vec<&'static str> {
        let context = self.context;
        let mut names = Vec::new();
        if context.golden_mr_accessories > 0 {
            names.push("The Smile of Mr. A.");
        }
        if context.toggle_optimality_level > 0 {
            names.push("Toggle Optimality");
        }
        if context.has_effect("Cowrruption") && class_name.eq_ignore_ascii_case("Cow Puncher") {
            names.push("Absorb Cowrruption");
        }
        if context.can_seek_birds {
            names.push("Seek out a Bird");
        }
        names
    }
}
