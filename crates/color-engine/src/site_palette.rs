use serde::{Deserialize, Serialize};

use crate::contrast::{check_contrast, ContrastResult};
use crate::conversion::{hex_to_hsl, hsl_to_hex, normalize_hex};
use crate::search::{suggest_best_multi_contrast_color, MultiSuggestion};
use crate::Result;

/// A named slot in a [`SitePalette`]. `ALL` is also the priority order used
/// when resolving collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
    Background,
    Text,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Primary,
        Role::Secondary,
        Role::Tertiary,
        Role::Background,
        Role::Text,
    ];

    pub fn default_hex(self) -> &'static str {
        match self {
            Role::Primary => "#4A90E2",
            Role::Secondary => "#7B8C99",
            Role::Tertiary => "#F8C471",
            Role::Background => "#F5F5F5",
            Role::Text => "#2E2E2E",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Tertiary => "tertiary",
            Role::Background => "background",
            Role::Text => "text",
        }
    }

    /// Roles this one is drawn on top of, or that are drawn on top of it.
    pub fn contrast_partners(self) -> Vec<Role> {
        CONTRAST_RULES
            .iter()
            .filter_map(|rule| {
                if rule.foreground == self {
                    Some(rule.background)
                } else if rule.background == self {
                    Some(rule.foreground)
                } else {
                    None
                }
            })
            .collect()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pair of roles that must stay readable against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastRule {
    pub foreground: Role,
    pub background: Role,
    /// Accent roles are used for headings and buttons, so they are held to
    /// the large-text threshold.
    pub large_text: bool,
}

pub const CONTRAST_RULES: [ContrastRule; 4] = [
    ContrastRule {
        foreground: Role::Text,
        background: Role::Background,
        large_text: false,
    },
    ContrastRule {
        foreground: Role::Primary,
        background: Role::Background,
        large_text: true,
    },
    ContrastRule {
        foreground: Role::Secondary,
        background: Role::Background,
        large_text: true,
    },
    ContrastRule {
        foreground: Role::Tertiary,
        background: Role::Background,
        large_text: true,
    },
];

/// The five-color site palette. This is also the JSON shape persisted by
/// palette stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitePalette {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub background: String,
    pub text: String,
}

impl Default for SitePalette {
    fn default() -> Self {
        SitePalette {
            primary: canonical(Role::Primary.default_hex()),
            secondary: canonical(Role::Secondary.default_hex()),
            tertiary: canonical(Role::Tertiary.default_hex()),
            background: canonical(Role::Background.default_hex()),
            text: canonical(Role::Text.default_hex()),
        }
    }
}

impl SitePalette {
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Tertiary => &self.tertiary,
            Role::Background => &self.background,
            Role::Text => &self.text,
        }
    }

    pub fn set(&mut self, role: Role, hex: impl Into<String>) {
        let slot = match role {
            Role::Primary => &mut self.primary,
            Role::Secondary => &mut self.secondary,
            Role::Tertiary => &mut self.tertiary,
            Role::Background => &mut self.background,
            Role::Text => &mut self.text,
        };

        *slot = hex.into();
    }

    /// Checks that every role holds a valid hex color and lowercases them.
    pub fn normalized(&self) -> Result<SitePalette> {
        let mut palette = self.clone();

        for role in Role::ALL {
            palette.set(role, normalize_hex(self.get(role))?);
        }

        Ok(palette)
    }

    /// Replaces any role whose color repeats an earlier role's (in
    /// [`Role::ALL`] order) with that role's default. If the default is
    /// taken too, its lightness is nudged until it is free.
    pub fn ensure_unique_roles(&mut self) {
        let mut taken: Vec<String> = Vec::with_capacity(Role::ALL.len());

        for role in Role::ALL {
            let current = canonical(self.get(role));

            if !taken.contains(&current) {
                taken.push(current);
                continue;
            }

            let replacement = free_variant_of(role.default_hex(), &taken);
            tracing::debug!(
                role = role.as_str(),
                collided = %current,
                replacement = %replacement,
                "replaced duplicate palette color"
            );

            self.set(role, replacement.clone());
            taken.push(replacement);
        }
    }

    pub fn has_unique_roles(&self) -> bool {
        let hexes: Vec<String> = Role::ALL.iter().map(|r| canonical(self.get(*r))).collect();

        hexes
            .iter()
            .enumerate()
            .all(|(i, hex)| !hexes[..i].contains(hex))
    }
}

/// Lowercases a color for comparison; the permissive parser is used so
/// malformed entries compare as black, the same way they are rendered.
pub(crate) fn canonical(hex: &str) -> String {
    normalize_hex(hex).unwrap_or_else(|_| String::from("#000000"))
}

fn free_variant_of(hex: &str, taken: &[String]) -> String {
    let base = canonical(hex);
    if !taken.contains(&base) {
        return base;
    }

    let hsl = hex_to_hsl(&base);
    for step in 1..=100 {
        for lightness in [hsl.lightness - step as f64, hsl.lightness + step as f64] {
            if !(0.0..=100.0).contains(&lightness) {
                continue;
            }

            let candidate = hsl_to_hex(hsl.with_lightness(lightness));
            if !taken.contains(&candidate) {
                return candidate;
            }
        }
    }

    base
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairCheck {
    pub foreground: Role,
    pub background: Role,
    pub foreground_hex: String,
    pub background_hex: String,
    pub large_text: bool,
    #[serde(flatten)]
    pub result: ContrastResult,
}

/// Evaluates every rule in [`CONTRAST_RULES`] against the palette.
pub fn audit_palette(palette: &SitePalette) -> Vec<PairCheck> {
    CONTRAST_RULES
        .iter()
        .map(|rule| {
            let foreground_hex = palette.get(rule.foreground).to_string();
            let background_hex = palette.get(rule.background).to_string();

            PairCheck {
                foreground: rule.foreground,
                background: rule.background,
                result: check_contrast(&foreground_hex, &background_hex, rule.large_text),
                foreground_hex,
                background_hex,
                large_text: rule.large_text,
            }
        })
        .collect()
}

/// Searches for a lightness adjustment of `role` that scores best against all
/// of its contrast partners.
pub fn suggest_role_color(palette: &SitePalette, role: Role) -> MultiSuggestion {
    let partners: Vec<String> = role
        .contrast_partners()
        .into_iter()
        .map(|partner| palette.get(partner).to_string())
        .collect();

    suggest_best_multi_contrast_color(palette.get(role), &partners)
}

/// Replaces every role that fails a contrast rule with its suggestion, then
/// separates any roles the suggestions made identical. A colliding role is
/// nudged in lightness to the nearest free color that still passes all of its
/// rules; [`SitePalette::ensure_unique_roles`] covers whatever is left.
///
/// The result always has unique roles but is not guaranteed to pass: callers
/// should run [`audit_palette`] on it again.
pub fn repair_palette(palette: &SitePalette) -> SitePalette {
    let mut repaired = palette.clone();

    for check in audit_palette(palette) {
        if !check.result.compliance.passes() {
            let suggestion = suggest_role_color(&repaired, check.foreground);
            repaired.set(check.foreground, suggestion.color);
        }
    }

    let mut taken: Vec<String> = Vec::with_capacity(Role::ALL.len());
    for role in Role::ALL {
        let current = canonical(repaired.get(role));

        if !taken.contains(&current) {
            taken.push(current);
        } else if let Some(variant) = passing_variant_of(&repaired, role, &taken) {
            tracing::debug!(
                role = role.as_str(),
                collided = %current,
                replacement = %variant,
                "separated repaired palette color"
            );

            repaired.set(role, variant.clone());
            taken.push(variant);
        }
    }
    repaired.ensure_unique_roles();

    repaired
}

/// Nearest lightness variant of `role`'s color, darker first, that nobody in
/// `taken` holds and that passes every rule `role` takes part in.
fn passing_variant_of(palette: &SitePalette, role: Role, taken: &[String]) -> Option<String> {
    let hsl = hex_to_hsl(palette.get(role));

    let passes_with = |candidate: &str| {
        let mut trial = palette.clone();
        trial.set(role, candidate);

        CONTRAST_RULES
            .iter()
            .filter(|rule| rule.foreground == role || rule.background == role)
            .all(|rule| {
                check_contrast(
                    trial.get(rule.foreground),
                    trial.get(rule.background),
                    rule.large_text,
                )
                .compliance
                .passes()
            })
    };

    for step in 1..=100 {
        for lightness in [hsl.lightness - step as f64, hsl.lightness + step as f64] {
            if !(0.0..=100.0).contains(&lightness) {
                continue;
            }

            let candidate = hsl_to_hex(hsl.with_lightness(lightness));
            if !taken.contains(&candidate) && passes_with(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

/// Load/save port for the caller-owned palette. The engine never persists
/// anything on its own.
pub trait PaletteStore {
    fn load(&self) -> Result<Option<SitePalette>>;
    fn save(&mut self, palette: &SitePalette) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    palette: Option<SitePalette>,
}

impl PaletteStore for MemoryStore {
    fn load(&self) -> Result<Option<SitePalette>> {
        Ok(self.palette.clone())
    }

    fn save(&mut self, palette: &SitePalette) -> Result<()> {
        self.palette = Some(palette.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::Compliance;
    use pretty_assertions::assert_eq;

    fn palette(hexes: [&str; 5]) -> SitePalette {
        SitePalette {
            primary: hexes[0].to_string(),
            secondary: hexes[1].to_string(),
            tertiary: hexes[2].to_string(),
            background: hexes[3].to_string(),
            text: hexes[4].to_string(),
        }
    }

    #[test]
    fn serializes_to_role_keyed_json() {
        let json = serde_json::to_value(SitePalette::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "primary": "#4a90e2",
                "secondary": "#7b8c99",
                "tertiary": "#f8c471",
                "background": "#f5f5f5",
                "text": "#2e2e2e",
            })
        );
    }

    #[test]
    fn collisions_fall_back_to_role_defaults() {
        let mut p = palette(["#112233", "#112233", "#445566", "#445566", "#112233"]);
        p.ensure_unique_roles();

        assert_eq!(
            p,
            palette(["#112233", "#7b8c99", "#445566", "#f5f5f5", "#2e2e2e"])
        );
        assert!(p.has_unique_roles());
    }

    #[test]
    fn collisions_are_case_insensitive() {
        let mut p = palette(["#ABCDEF", "#abcdef", "#000001", "#fffffe", "#000002"]);
        p.ensure_unique_roles();

        assert_eq!(p.secondary, "#7b8c99");
    }

    #[test]
    fn taken_default_is_nudged() {
        let mut p = palette(["#f5f5f5", "#7b8c99", "#f8c471", "#F5F5F5", "#2e2e2e"]);
        p.ensure_unique_roles();

        assert!(p.has_unique_roles());
        assert_ne!(p.background, "#f5f5f5");
    }

    #[test]
    fn partners_come_from_the_rule_table() {
        assert_eq!(
            Role::Background.contrast_partners(),
            vec![Role::Text, Role::Primary, Role::Secondary, Role::Tertiary]
        );
        assert_eq!(Role::Text.contrast_partners(), vec![Role::Background]);
        assert_eq!(Role::Tertiary.contrast_partners(), vec![Role::Background]);
    }

    #[test]
    fn audits_every_rule() {
        let p = palette(["#4a90e2", "#7b8c99", "#f8c471", "#ffffff", "#000000"]);
        let checks = audit_palette(&p);

        assert_eq!(checks.len(), CONTRAST_RULES.len());

        let text = &checks[0];
        assert_eq!(text.foreground, Role::Text);
        assert_eq!(text.result.compliance, Compliance::Aaa);

        let tertiary = checks.iter().find(|c| c.foreground == Role::Tertiary).unwrap();
        assert_eq!(tertiary.result.compliance, Compliance::Fail);
    }

    #[test]
    fn suggests_a_darker_text_color() {
        let p = palette(["#4a90e2", "#7b8c99", "#f8c471", "#ffffff", "#cccccc"]);
        let suggestion = suggest_role_color(&p, Role::Text);

        assert_eq!(suggestion.aaa, 1);
        assert_eq!(suggestion.details.len(), 1);
    }

    #[test]
    fn repair_separates_roles_that_converge_on_one_gray() {
        // Both grays fail on white and the search sends both to the same
        // first AAA gray.
        let p = palette(["#969696", "#7b8c99", "#123456", "#ffffff", "#999999"]);
        assert_eq!(
            suggest_role_color(&p, Role::Primary).color,
            suggest_role_color(&p, Role::Text).color
        );

        let repaired = repair_palette(&p);

        assert!(repaired.has_unique_roles(), "{repaired:?}");
        assert!(audit_palette(&repaired)
            .iter()
            .all(|check| check.result.compliance.passes()));
        assert_eq!(repaired.secondary, "#7b8c99");
        assert_eq!(repaired.tertiary, "#123456");
        assert_eq!(repaired.background, "#ffffff");
    }

    #[test]
    fn repair_leaves_a_passing_palette_alone() {
        let p = palette(["#4a90e2", "#7b8c99", "#2e7d32", "#ffffff", "#000000"]);

        assert_eq!(repair_palette(&p), p);
    }

    #[test]
    fn normalizes_or_rejects() {
        let p = palette(["#4A90E2", "#7B8C99", "#F8C471", "#F5F5F5", "#2E2E2E"]);
        assert_eq!(p.normalized().unwrap(), SitePalette::default());

        let bad = palette(["#4A90E2", "nope", "#F8C471", "#F5F5F5", "#2E2E2E"]);
        assert!(bad.normalized().is_err());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), None);

        store.save(&SitePalette::default()).unwrap();
        assert_eq!(store.load().unwrap(), Some(SitePalette::default()));
    }
}
