use crate::config::types::RuleDef;
use crate::error::{MediabroError, Result};
use crate::rules::template::Template;
use regex::{Regex, RegexBuilder};

/// How a matching rule builds its output.
#[derive(Debug, Clone)]
pub enum ReplacementSpec {
	/// Replacement text with `$n` group references.
	Template(Template),

	/// `prefix + group(1) + suffix`.
	PrefixSuffix { prefix: String, suffix: String },
}

impl std::fmt::Display for ReplacementSpec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ReplacementSpec::Template(template) => write!(f, "template: {}", template.as_str()),
			ReplacementSpec::PrefixSuffix { prefix, suffix } => {
				write!(f, "prefix: {prefix:?} suffix: {suffix:?}")
			}
		}
	}
}

/// A compiled rule ready for matching.
#[derive(Debug, Clone)]
pub struct Rule {
	/// Case-insensitive, unanchored pattern.
	pub pattern: Regex,

	pub replacement: ReplacementSpec,
}

impl Rule {
	/// Compile a rule definition, checking that every group the
	/// replacement needs exists in the pattern.
	pub fn compile(def: &RuleDef) -> Result<Self> {
		def.validate()?;

		let pattern = compile_regex(&def.pattern)?;
		let available = pattern.captures_len() - 1;

		let replacement = match def.template {
			Some(ref template) => {
				let parsed = Template::parse(template, available).map_err(|source| {
					MediabroError::InvalidTemplate {
						pattern: def.pattern.clone(),
						template: template.clone(),
						source,
					}
				})?;
				ReplacementSpec::Template(parsed)
			}
			None => {
				if available < 1 {
					return Err(MediabroError::MissingCapture {
						pattern: def.pattern.clone(),
					});
				}
				ReplacementSpec::PrefixSuffix {
					prefix: def.prefix.clone().unwrap_or_default(),
					suffix: def.suffix.clone().unwrap_or_default(),
				}
			}
		};

		Ok(Rule {
			pattern,
			replacement,
		})
	}

	/// Apply this rule to `input`.
	///
	/// Returns `Ok(None)` when the pattern does not match anywhere.
	pub fn apply(&self, input: &str) -> Result<Option<String>> {
		let Some(caps) = self.pattern.captures(input) else {
			return Ok(None);
		};

		let output = match self.replacement {
			ReplacementSpec::Template(ref template) => template.expand(&caps, input),
			ReplacementSpec::PrefixSuffix {
				ref prefix,
				ref suffix,
			} => {
				let group = caps.get(1).ok_or_else(|| MediabroError::MissingCapture {
					pattern: self.pattern.as_str().to_string(),
				})?;
				format!("{prefix}{}{suffix}", group.as_str())
			}
		};

		Ok(Some(output))
	}
}

/// Compile a regex pattern string, case-insensitively.
fn compile_regex(pattern: &str) -> Result<Regex> {
	RegexBuilder::new(pattern)
		.case_insensitive(true)
		.build()
		.map_err(|source| MediabroError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})
}

/// An immutable, ordered set of rules for one profile.
#[derive(Debug, Clone)]
pub struct RuleTable {
	name: String,
	rules: Vec<Rule>,
}

impl RuleTable {
	/// Compile all rule definitions of a profile, in order.
	pub fn compile(name: &str, defs: &[RuleDef]) -> Result<Self> {
		let rules = defs.iter().map(Rule::compile).collect::<Result<Vec<_>>>()?;

		Ok(RuleTable {
			name: name.to_string(),
			rules,
		})
	}

	/// Profile name this table was built from.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}
}
