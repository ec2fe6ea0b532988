use regex::Captures;

/// Error raised while parsing a replacement template against its pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
	#[error("group ${group} is referenced but the pattern only has {available} capture group(s)")]
	GroupOutOfRange { group: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Literal(String),
	Group(usize),
	WholeMatch,
	BeforeMatch,
	AfterMatch,
}

/// A replacement string with positional group references, pre-parsed
/// against the number of groups its pattern provides.
///
/// Syntax:
/// - `$1` .. `$99` insert a capture group. Two digits are taken only when
///   that two-digit group exists, so `$10` with one group is `$1` then `0`.
///   A leading zero is allowed: `$01` is group 1.
/// - `$&` inserts the whole match, `$$` a literal dollar.
/// - `` $` `` inserts the text before the match, `$'` the text after it.
/// - Any other `$` (including `$0` and `$00`) is kept as literal text.
///
/// Groups that did not take part in the match expand to nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	source: String,
	parts: Vec<Part>,
}

impl Template {
	/// Parse `source`, rejecting references beyond `available` groups.
	pub fn parse(source: &str, available: usize) -> Result<Self, TemplateError> {
		let mut parts = Vec::new();
		let mut literal = String::new();
		let mut rest = source;

		while let Some(pos) = rest.find('$') {
			literal.push_str(&rest[..pos]);
			let after = &rest[pos + 1..];
			let bytes = after.as_bytes();

			match bytes.first() {
				Some(b'$') => {
					literal.push('$');
					rest = &after[1..];
				}
				Some(b'&') => {
					flush_literal(&mut parts, &mut literal);
					parts.push(Part::WholeMatch);
					rest = &after[1..];
				}
				Some(b'`') => {
					flush_literal(&mut parts, &mut literal);
					parts.push(Part::BeforeMatch);
					rest = &after[1..];
				}
				Some(b'\'') => {
					flush_literal(&mut parts, &mut literal);
					parts.push(Part::AfterMatch);
					rest = &after[1..];
				}
				Some(&first @ b'0'..=b'9') => {
					let one = usize::from(first - b'0');
					let two = match bytes.get(1) {
						Some(&second @ b'0'..=b'9') => Some(one * 10 + usize::from(second - b'0')),
						_ => None,
					};
					// `$0n` always names group n; `$nn` only when group nn exists
					let (group, consumed) = match two {
						Some(group) if group >= 1 && (one == 0 || group <= available) => (group, 2),
						_ => (one, 1),
					};
					if group == 0 {
						literal.push('$');
						rest = after;
						continue;
					}
					if group > available {
						return Err(TemplateError::GroupOutOfRange { group, available });
					}
					flush_literal(&mut parts, &mut literal);
					parts.push(Part::Group(group));
					rest = &after[consumed..];
				}
				_ => {
					literal.push('$');
					rest = after;
				}
			}
		}

		literal.push_str(rest);
		flush_literal(&mut parts, &mut literal);

		Ok(Template {
			source: source.to_string(),
			parts,
		})
	}

	/// The template text as written in the config.
	pub fn as_str(&self) -> &str {
		&self.source
	}

	/// Build the replacement for one match of `caps` within `haystack`.
	pub fn expand(&self, caps: &Captures<'_>, haystack: &str) -> String {
		let mut out = String::with_capacity(self.source.len());
		for part in &self.parts {
			match part {
				Part::Literal(text) => out.push_str(text),
				Part::Group(index) => {
					if let Some(m) = caps.get(*index) {
						out.push_str(m.as_str());
					}
				}
				Part::WholeMatch => {
					if let Some(m) = caps.get(0) {
						out.push_str(m.as_str());
					}
				}
				Part::BeforeMatch => {
					if let Some(m) = caps.get(0) {
						out.push_str(&haystack[..m.start()]);
					}
				}
				Part::AfterMatch => {
					if let Some(m) = caps.get(0) {
						out.push_str(&haystack[m.end()..]);
					}
				}
			}
		}
		out
	}
}

fn flush_literal(parts: &mut Vec<Part>, literal: &mut String) {
	if !literal.is_empty() {
		parts.push(Part::Literal(std::mem::take(literal)));
	}
}
