use crate::error::Result;
use crate::rules::table::RuleTable;

/// Outcome of resolving one input against a rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// A rule matched and produced `output`.
	Rewritten { rule_index: usize, output: String },

	/// No rule in the table matched.
	NoMatch,
}

impl Resolution {
	pub fn is_match(&self) -> bool {
		matches!(self, Resolution::Rewritten { .. })
	}

	/// The rewritten string, if any rule matched.
	pub fn output(&self) -> Option<&str> {
		match self {
			Resolution::Rewritten { output, .. } => Some(output),
			Resolution::NoMatch => None,
		}
	}

	/// The rewritten string, or `input` untouched when nothing matched.
	pub fn or_original(self, input: &str) -> String {
		match self {
			Resolution::Rewritten { output, .. } => output,
			Resolution::NoMatch => input.to_string(),
		}
	}
}

/// Rewrite `input` with the first rule in `table` whose pattern matches.
pub fn resolve(input: &str, table: &RuleTable) -> Result<Resolution> {
	for (rule_index, rule) in table.rules().iter().enumerate() {
		if let Some(output) = rule.apply(input)? {
			tracing::debug!(
				profile = table.name(),
				rule = rule_index + 1,
				input,
				output = %output,
				"rule matched"
			);
			return Ok(Resolution::Rewritten { rule_index, output });
		}
	}

	tracing::trace!(profile = table.name(), input, "no rule matched");
	Ok(Resolution::NoMatch)
}

impl RuleTable {
	/// See [`resolve`].
	pub fn resolve(&self, input: &str) -> Result<Resolution> {
		resolve(input, self)
	}
}
