//! Character sheet parsing.
//!
//! The sheet is read top to bottom in one pass. Each field is found by
//! seeking its label in the token stream and reading what follows, so the
//! order of the steps below is the order of the page:
//!
//! ```text
//! (#id) → class → HP → MP | horde | - → [Class:] → Mus → Mys → Mox
//!       → [inebriety] → Adventures → Meat → [Ascensions] → Turns → Days
//!       → [Sign] → flags → skills
//! ```
//!
//! Sections in brackets are optional. Their presence is decided by scanning
//! the raw page text before seeking. Flags are raw-text checks only.

use std::sync::LazyLock;

use regex::Regex;
use statline_foundation::{Error, ErrorContext, Result, SkillCatalog, Stat};
use statline_markup::token::parse_int;
use statline_markup::{Document, TokenStream};

use crate::context::{ParseContext, ResourceMode, SubpointFormula};
use crate::skills::{Anomaly, SkillSetExtractor};
use crate::snapshot::{CharacterStatusSnapshot, ConsumptionRestriction, Pool, StatValue};

static AVATAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img src=[^>]*?(?:images.kingdomofloathing.com|/images)/([^>'"\s]+)"#)
        .expect("avatar pattern is valid")
});

static BASE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(base: ([\d,]+)\)").expect("base pattern is valid"));

static PARENTHESIZED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\s*([+-]?[\d,]+)").expect("subpoint pattern is valid"));

static LEVEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Level (\d+)").expect("level pattern is valid"));

/// Name used for the page in error context.
pub const SOURCE: &str = "charsheet";

const INEBRIETY_LABELS: [&str; 5] = ["Temul", "Inebr", "Tipsi", "Drunk", "Adven"];
const THIS_RUN: &str = "(this run)";

/// A parsed sheet and the anomalies seen while parsing it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusParse {
    /// The snapshot.
    pub snapshot: CharacterStatusSnapshot,
    /// Non-fatal oddities, in document order.
    pub anomalies: Vec<Anomaly>,
}

trait InField<T> {
    fn in_field(self, field: &str) -> Result<T>;
}

impl<T> InField<T> for Result<T> {
    fn in_field(self, field: &str) -> Result<T> {
        self.map_err(|err| err.in_field(field))
    }
}

/// Builds a [`CharacterStatusSnapshot`] from one character sheet.
pub struct StatusSnapshotParser<'a, C, F> {
    context: &'a ParseContext,
    skills: &'a C,
    formula: &'a F,
}

impl<'a, C, F> StatusSnapshotParser<'a, C, F>
where
    C: SkillCatalog,
    F: SubpointFormula,
{
    /// Creates a parser.
    #[must_use]
    pub fn new(context: &'a ParseContext, skills: &'a C, formula: &'a F) -> Self {
        Self {
            context,
            skills,
            formula,
        }
    }

    /// Parses raw page text.
    ///
    /// # Errors
    ///
    /// See [`StatusSnapshotParser::parse`].
    pub fn parse_raw(&self, raw: &str) -> Result<StatusParse> {
        self.parse(&Document::parse(raw))
    }

    /// Parses a page.
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if a required label is missing,
    /// `MalformedNumber` if a numeric field is not a number, and
    /// `StructuralQuery` if the skill query fails. Nothing is returned on
    /// failure; there is no partial snapshot.
    pub fn parse(&self, document: &Document) -> Result<StatusParse> {
        self.parse_inner(document).map_err(|mut err| {
            let context = err.context.take().unwrap_or_default();
            err.context = Some(ErrorContext {
                source: Some(SOURCE.to_string()),
                ..context
            });
            tracing::warn!(error = %err, context = ?err.context, "character sheet parse failed");
            err
        })
    }

    fn parse_inner(&self, document: &Document) -> Result<StatusParse> {
        let raw = document.raw();
        let mut tokens = document.token_stream();
        let mut sheet = CharacterStatusSnapshot {
            avatar: AVATAR.captures(raw).map(|caps| caps[1].to_string()),
            ..CharacterStatusSnapshot::default()
        };

        read_identity(&mut tokens, &mut sheet).in_field("identity")?;

        sheet.hp = read_pool(&mut tokens).in_field("hit points")?;
        sheet.mana = match self.context.mode {
            ResourceMode::Mana => read_pool(&mut tokens).in_field("mana")?,
            ResourceMode::ZombieHorde => {
                tokens.seek("Zombie Horde").in_field("zombie horde")?;
                Pool::uniform(tokens.read_int().in_field("zombie horde")?)
            }
            ResourceMode::NoMana => Pool::default(),
        };

        if tokens.try_seek_before("Class:", Stat::Muscle.tag()).is_some() {
            sheet.class_name = tokens.next_token().in_field("class")?.to_string();
        }

        sheet.muscle = self.read_stat(&mut tokens, Stat::Muscle)?;
        sheet.mysticality = self.read_stat(&mut tokens, Stat::Mysticality)?;
        sheet.moxie = self.read_stat(&mut tokens, Stat::Moxie)?;

        let found = tokens.seek_any(&INEBRIETY_LABELS).in_field("inebriety")?;
        if found + 1 < INEBRIETY_LABELS.len() {
            sheet.inebriety = tokens.read_int().in_field("inebriety")?;
            tokens.seek("Adven").in_field("adventures")?;
        }
        sheet.adventures = tokens.read_int().in_field("adventures")?;

        tokens.seek("Meat").in_field("meat")?;
        sheet.meat = tokens.read_int().in_field("meat")?;

        if raw.contains("Ascensions:") {
            tokens.seek("Ascensions").in_field("ascensions")?;
            sheet.ascensions = tokens.read_int().in_field("ascensions")?;
        }

        let run_stats = raw.contains(THIS_RUN);
        sheet.turns_this_run = read_run_counter(&mut tokens, "Turns", run_stats).in_field("turns")?;
        sheet.days_this_run = read_run_counter(&mut tokens, "Days", run_stats).in_field("days")?;

        if raw.contains("Sign:") {
            tokens.seek("Sign:").in_field("sign")?;
            sheet.sign = Some(tokens.next_token().in_field("sign")?.to_string());
        }

        sheet.path_restricted = raw.contains("standard.php");
        sheet.consumption = ConsumptionRestriction::detect(raw);
        sheet.hardcore = raw.contains("You are in Hardcore mode");
        sheet.ronin = raw.contains("You may not receive items from other players");
        sheet.has_store = raw.contains("Mall of Loathing");
        sheet.has_display_case = raw.contains("in the Museum");

        let extraction = SkillSetExtractor::new(self.skills, self.context)
            .extract(document, &sheet.class_name)
            .in_field("skills")?;
        sheet.skills = extraction.skills;

        tracing::debug!(
            user_id = sheet.user_id,
            class = %sheet.class_name,
            adventures = sheet.adventures,
            skills = sheet.skills.available.len(),
            "parsed character sheet"
        );

        Ok(StatusParse {
            snapshot: sheet,
            anomalies: extraction.anomalies,
        })
    }

    fn read_stat(&self, tokens: &mut TokenStream, stat: Stat) -> Result<StatValue> {
        let field = stat.to_string();
        tokens.seek(stat.tag()).in_field(&field)?;
        let value = tokens.read_int().in_field(&field)?;
        let base = read_base(tokens, value).in_field(&field)?;

        let opening = tokens
            .seek_by("(", |token| {
                token.starts_with('(') && !BASE_QUALIFIER.is_match(token)
            })
            .in_field(&field)?;
        let inside = PARENTHESIZED_NUMBER
            .captures(opening)
            .map(|caps| caps[1].to_string());
        let progress = match inside {
            Some(number) => parse_int(&number).in_field(&field)?,
            None => tokens.read_int().in_field(&field)?,
        };

        Ok(StatValue::new(
            value,
            base,
            self.formula.subpoints(base, progress),
        ))
    }
}

/// Reads `(#id)`, an optional `Level N` line, and the class name.
fn read_identity(tokens: &mut TokenStream, sheet: &mut CharacterStatusSnapshot) -> Result<()> {
    let id = tokens.seek("(#")?;
    let digits = id.trim_start_matches("(#").trim_end_matches(')');
    let user_id = parse_int(digits)?;
    sheet.user_id = u64::try_from(user_id).map_err(|_| Error::malformed_number(id))?;

    let first = tokens.next_token()?;
    let level = LEVEL.captures(first).map(|caps| caps[1].parse().ok());
    let class = match level {
        Some(level) => {
            sheet.level = level;
            tokens.next_token()?
        }
        None => first,
    };
    sheet.class_name = class.to_string();
    Ok(())
}

/// Reads `Current ... N`, `Maximum ... N`, and an optional base qualifier.
fn read_pool(tokens: &mut TokenStream) -> Result<Pool> {
    tokens.seek("Current")?;
    let current = tokens.read_int()?;
    tokens.seek("Maximum")?;
    let maximum = tokens.read_int()?;
    let base = read_base(tokens, maximum)?;
    Ok(Pool::new(current, maximum, base))
}

/// Consumes the next token and reads a `(base: N)` qualifier from it,
/// falling back to `default` when it is something else.
fn read_base(tokens: &mut TokenStream, default: i64) -> Result<i64> {
    let token = tokens.next_token()?;
    match BASE_QUALIFIER.captures(token) {
        Some(caps) => parse_int(&caps[1]),
        None => Ok(default),
    }
}

/// When the page shows per-run counters, only the `(this run)` row counts.
fn read_run_counter(tokens: &mut TokenStream, label: &str, run_stats: bool) -> Result<i64> {
    let description = if run_stats {
        format!("{label} {THIS_RUN}")
    } else {
        label.to_string()
    };
    tokens.seek_by(&description, |token| {
        token.starts_with(label) && (!run_stats || token.contains(THIS_RUN))
    })?;
    tokens.read_int()
}
