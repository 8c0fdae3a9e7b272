use std::ops::Range;

use crate::AttributeSyntax;
use crate::lexer::Attribute;
use crate::lexer::name_attribute;
use crate::lexer::tokenize_attributes;

const CLOSE: &str = "/>";

/// The parsed attribute payload of a [`DirectiveMatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'a> {
	/// JSON syntax: the brace-delimited object literal, if one was written.
	Json(Option<&'a str>),
	/// Attribute syntax: every token in source order.
	Attributes(Vec<Attribute<'a>>),
}

/// A single recognized directive inside a block of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveMatch<'a> {
	/// Byte range of the whole directive, from `<` through `/>`.
	pub span: Range<usize>,
	/// The `name` value for JSON syntax. Empty for attribute syntax, where the
	/// name is read from the attributes instead.
	pub name: &'a str,
	/// The trimmed text between the identifier and `/>`.
	pub raw_payload: &'a str,
	pub payload: Payload<'a>,
	source: &'a str,
}

impl<'a> DirectiveMatch<'a> {
	/// The matched text, e.g. `<CustomComponent name="x" />`.
	pub fn as_str(&self) -> &'a str {
		&self.source[self.span.clone()]
	}

	pub fn start(&self) -> usize {
		self.span.start
	}

	pub fn end(&self) -> usize {
		self.span.end
	}

	/// Number of bytes consumed by the directive.
	pub fn len(&self) -> usize {
		self.span.len()
	}

	pub fn is_empty(&self) -> bool {
		self.span.is_empty()
	}
}

/// Locates `<Identifier ... />` directives in text.
///
/// The scanner looks for the literal `<` followed by the identifier and at
/// least one whitespace character. The payload runs up to the first `/>`,
/// which may be several lines further on. Candidates whose payload does not
/// fit the configured [`AttributeSyntax`] are skipped and scanning resumes at
/// the next byte, so rejected text stays in the output untouched.
#[derive(Debug, Clone)]
pub struct DirectiveMatcher {
	opening: String,
	syntax: AttributeSyntax,
}

impl DirectiveMatcher {
	pub fn new(match_name: &str, syntax: AttributeSyntax) -> Self {
		Self {
			opening: format!("<{match_name}"),
			syntax,
		}
	}

	/// Iterate over all non-overlapping directives in `text`, left to right.
	pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> Matches<'m, 't> {
		Matches {
			matcher: self,
			text,
			cursor: 0,
		}
	}

	/// Find the first directive starting at or after byte offset `start`.
	///
	/// Runs in linear time. Candidates that share the same closing `/>` reuse
	/// its offset, and once no `/>` is left the search stops.
	pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<DirectiveMatch<'t>> {
		let mut cursor = start;
		let mut next_close = None;

		while let Some(found) = text.get(cursor..)?.find(&self.opening) {
			let open = cursor + found;

			match self.match_at(text, open, &mut next_close) {
				Candidate::Matched(directive) => return Some(directive),
				Candidate::Unclosed => return None,
				Candidate::Rejected => {
					tracing::trace!(offset = open, "rejected directive candidate");
				}
			}

			// `<` is a single byte so this stays on a char boundary.
			cursor = open + 1;
		}

		None
	}

	/// `next_close` caches the absolute offset of the closest `/>` found so
	/// far.
	fn match_at<'t>(
		&self,
		text: &'t str,
		open: usize,
		next_close: &mut Option<usize>,
	) -> Candidate<'t> {
		let body_start = open + self.opening.len();

		if !text[body_start..].starts_with(char::is_whitespace) {
			return Candidate::Rejected;
		}

		let close = match *next_close {
			Some(close) if close >= body_start => close,
			_ => {
				let Some(offset) = text[body_start..].find(CLOSE) else {
					return Candidate::Unclosed;
				};
				let close = body_start + offset;
				*next_close = Some(close);
				close
			}
		};

		let raw_payload = text[body_start..close].trim();
		let Some((name, payload)) = self.parse_payload(raw_payload) else {
			return Candidate::Rejected;
		};

		Candidate::Matched(DirectiveMatch {
			span: open..close + CLOSE.len(),
			name,
			raw_payload,
			payload,
			source: text,
		})
	}

	fn parse_payload<'t>(&self, raw_payload: &'t str) -> Option<(&'t str, Payload<'t>)> {
		match self.syntax {
			AttributeSyntax::Json => {
				let (name, rest) = name_attribute(raw_payload)?;
				let rest = rest.trim();

				if rest.is_empty() {
					return Some((name, Payload::Json(None)));
				}

				if rest.starts_with('{') && rest.ends_with('}') {
					Some((name, Payload::Json(Some(rest))))
				} else {
					None
				}
			}
			AttributeSyntax::Attributes => {
				let attributes = tokenize_attributes(raw_payload)?;
				Some(("", Payload::Attributes(attributes)))
			}
		}
	}
}

/// Outcome of checking one `<Identifier` occurrence.
enum Candidate<'t> {
	Matched(DirectiveMatch<'t>),
	/// The payload does not fit the syntax. Later candidates may still match.
	Rejected,
	/// No `/>` follows, so no later candidate can close either.
	Unclosed,
}

/// Iterator over the directives in a text, created by
/// [`DirectiveMatcher::find_iter`].
#[derive(Debug)]
pub struct Matches<'m, 't> {
	matcher: &'m DirectiveMatcher,
	text: &'t str,
	cursor: usize,
}

impl<'t> Iterator for Matches<'_, 't> {
	type Item = DirectiveMatch<'t>;

	fn next(&mut self) -> Option<Self::Item> {
		let directive = self.matcher.find_at(self.text, self.cursor)?;
		self.cursor = directive.end();
		Some(directive)
	}
}
