//! Parameter resolution.
//!
//! Turns user-supplied key/value pairs plus a table of derived-parameter
//! rules into a complete, validated [`ParameterSet`]. This runs before any
//! rendering: a configuration problem (cycle, collision, bad value) is
//! reported here, never halfway through a render.
//!
//! ## Derived rules
//!
//! A [`DerivedRule`] computes a new parameter from an existing one through a
//! pipeline of pure string transforms, e.g.
//!
//! ```text
//! bundle_path = bundle_id with '.' replaced by '/'
//! ```
//!
//! Rules may derive from other rules; evaluation order is the topological
//! order of the dependency graph. A cycle is a fatal configuration error.
//!
//! ## Value safety
//!
//! Every resolved value — user-supplied or derived — may end up inside a
//! destination path, so values that could escape the destination root
//! (`..` segments, absolute prefixes, backslashes, NUL) are rejected here.
//! A `/` inside a value is legal: that is exactly how `bundle_path`
//! produces nested directories.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Resolved mapping of parameter names to string values.
///
/// `BTreeMap` (not `HashMap`) so iteration order — and therefore every log
/// line and error message derived from it — is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Resolve user parameters plus derived rules into a complete set.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyParameterName`] — a user key is empty.
    /// - [`DomainError::InvalidParameterValue`] — a value contains token
    ///   syntax or could escape the destination root.
    /// - [`DomainError::ParameterCollision`] — two rules, or a rule and a
    ///   user key, define the same name.
    /// - [`DomainError::UnknownSourceParameter`] — a rule derives from a
    ///   name that is neither a user key nor another rule.
    /// - [`DomainError::CyclicParameters`] — the rule graph has a cycle.
    pub fn resolve(
        user: impl IntoIterator<Item = (String, String)>,
        rules: &[DerivedRule],
    ) -> Result<Self, DomainError> {
        let mut values = BTreeMap::new();

        for (name, value) in user {
            if name.trim().is_empty() {
                return Err(DomainError::EmptyParameterName);
            }
            validate_value(&name, &value)?;
            // Last write wins for repeated user keys (CLI override semantics).
            values.insert(name, value);
        }

        for rule in ordered_rules(rules, &values)? {
            let source = values.get(&rule.from).ok_or_else(|| {
                DomainError::UnknownSourceParameter {
                    rule: rule.name.clone(),
                    from: rule.from.clone(),
                }
            })?;

            let mut value = source.clone();
            for transform in &rule.transforms {
                value = transform.apply(&value);
            }

            validate_value(&rule.name, &value)?;
            values.insert(rule.name.clone(), value);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Reject values that carry token syntax or could escape the destination.
fn validate_value(name: &str, value: &str) -> Result<(), DomainError> {
    let reject = |reason: &str| {
        Err(DomainError::InvalidParameterValue {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if value.contains("{{") {
        return reject("contains unresolved token syntax '{{'");
    }
    if value.contains('\0') {
        return reject("contains a NUL byte");
    }
    if value.contains('\\') {
        return reject("contains a backslash");
    }
    if value.starts_with('/') {
        return reject("is an absolute path");
    }
    if value.split('/').any(|seg| seg == "..") {
        return reject("contains a '..' path segment");
    }

    Ok(())
}

/// Order rules topologically (Kahn's algorithm), detecting collisions,
/// unknown sources, and cycles up front.
fn ordered_rules<'a>(
    rules: &'a [DerivedRule],
    user: &BTreeMap<String, String>,
) -> Result<Vec<&'a DerivedRule>, DomainError> {
    let mut by_name: HashMap<&str, &DerivedRule> = HashMap::new();
    for rule in rules {
        if user.contains_key(&rule.name) || by_name.insert(rule.name.as_str(), rule).is_some() {
            return Err(DomainError::ParameterCollision {
                name: rule.name.clone(),
            });
        }
    }

    // in-degree counts only rule-to-rule edges; user keys are depth zero.
    let mut indegree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for rule in rules {
        let depends_on_rule = by_name.contains_key(rule.from.as_str());
        if !depends_on_rule && !user.contains_key(&rule.from) {
            return Err(DomainError::UnknownSourceParameter {
                rule: rule.name.clone(),
                from: rule.from.clone(),
            });
        }
        indegree.entry(rule.name.as_str()).or_insert(0);
        if depends_on_rule {
            *indegree.entry(rule.name.as_str()).or_insert(0) += 1;
            dependents
                .entry(rule.from.as_str())
                .or_default()
                .push(rule.name.as_str());
        }
    }

    // Seed with declaration order so the result is deterministic.
    let mut queue: VecDeque<&str> = rules
        .iter()
        .map(|r| r.name.as_str())
        .filter(|n| indegree[n] == 0)
        .collect();

    let mut ordered = Vec::with_capacity(rules.len());
    let mut resolved: HashSet<&str> = HashSet::new();

    while let Some(name) = queue.pop_front() {
        ordered.push(by_name[name]);
        resolved.insert(name);
        for &dep in dependents.get(name).into_iter().flatten() {
            if let Some(d) = indegree.get_mut(dep) {
                *d -= 1;
                if *d == 0 {
                    queue.push_back(dep);
                }
            }
        }
    }

    if ordered.len() != rules.len() {
        let mut names: Vec<String> = rules
            .iter()
            .map(|r| r.name.clone())
            .filter(|n| !resolved.contains(n.as_str()))
            .collect();
        names.sort();
        return Err(DomainError::CyclicParameters { names });
    }

    Ok(ordered)
}

// ── Derived rules ─────────────────────────────────────────────────────────────

/// Declarative rule computing one parameter from another.
///
/// Deserialized straight from the `[[derived]]` table of a template
/// manifest; see `stencil-adapters` for the manifest format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRule {
    /// Name of the parameter this rule defines.
    pub name: String,
    /// Name of the parameter the value is derived from.
    pub from: String,
    /// Transform pipeline, applied left to right.
    #[serde(default)]
    pub transforms: Vec<Transform>,
}

/// Pure string transform used in derived-rule pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Replace every occurrence of `find` with `with`.
    Replace { find: String, with: String },
    Lowercase,
    Uppercase,
    SnakeCase,
    KebabCase,
    PascalCase,
}

impl Transform {
    pub fn apply(&self, input: &str) -> String {
        match self {
            Self::Replace { find, with } => input.replace(find.as_str(), with),
            Self::Lowercase => input.to_lowercase(),
            Self::Uppercase => input.to_uppercase(),
            Self::SnakeCase => to_snake_case(input),
            Self::KebabCase => to_kebab_case(input),
            Self::PascalCase => to_pascal_case(input),
        }
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// snake_case: split on word boundaries, join with `_`, lowercase.
fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// kebab-case: same split as snake_case, joined with `-`.
fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// PascalCase: capitalize the first letter of each word, join without
/// separator.
fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    // to_uppercase handles Unicode correctly (e.g., "ß" -> "SS")
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Split a string into lowercase words on separators (`_`, `-`, whitespace,
/// `.`), camelCase transitions, and acronym boundaries (`HTTPRequest` splits
/// between `P` and `R`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase();
            let acronym_end = chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev_lower || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

// ── tests ─────────────────────────────────────────────────────────────────────
