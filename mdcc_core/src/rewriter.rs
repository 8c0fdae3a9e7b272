use std::ops::Range;

use serde::Serialize;

use crate::DirectiveMatch;
use crate::DirectiveMatcher;
use crate::MdccConfig;
use crate::MdccResult;
use crate::Payload;
use crate::PropValue;
use crate::Props;
use crate::lexer::RawValue;

/// An untouched run of the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextFragment {
	pub value: String,
	/// Byte range of `value` within the rewritten text.
	pub span: Range<usize>,
}

/// The structured element that replaces a matched directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
	/// The configured tag identifier, e.g. `custom-component`.
	pub tag_name: String,
	/// The directive's identifying name.
	pub name: String,
	pub props: Props,
	/// Byte range of the directive this component consumed.
	pub span: Range<usize>,
}

/// One unit of a rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Segment {
	Text(TextFragment),
	Component(Component),
}

impl Segment {
	pub fn span(&self) -> &Range<usize> {
		match self {
			Self::Text(fragment) => &fragment.span,
			Self::Component(component) => &component.span,
		}
	}

	pub fn as_component(&self) -> Option<&Component> {
		match self {
			Self::Component(component) => Some(component),
			Self::Text(_) => None,
		}
	}
}

/// Whether a rewrite result should replace its source node.
///
/// A lone text fragment is the unchanged input, so splicing it in would be a
/// wasted mutation.
pub fn should_splice(segments: &[Segment]) -> bool {
	segments.len() > 1 || matches!(segments.first(), Some(Segment::Component(_)))
}

/// Rewrites every directive in a text into a [`Component`], keeping the text
/// in between as [`TextFragment`]s.
///
/// A `Rewriter` holds no state between calls, so a single instance can be
/// shared across every text node of a document, or across threads.
#[derive(Debug, Clone)]
pub struct Rewriter {
	config: MdccConfig,
	matcher: DirectiveMatcher,
}

impl Default for Rewriter {
	fn default() -> Self {
		Self::new(MdccConfig::default())
	}
}

impl Rewriter {
	pub fn new(config: MdccConfig) -> Self {
		let matcher = DirectiveMatcher::new(&config.match_name, config.syntax);
		Self { config, matcher }
	}

	pub fn config(&self) -> &MdccConfig {
		&self.config
	}

	pub fn matcher(&self) -> &DirectiveMatcher {
		&self.matcher
	}

	/// Split `text` into text fragments and components.
	///
	/// The segments are ordered, never overlap, and together cover the whole
	/// input. Text with no directives comes back as a single fragment equal to
	/// the input. Fails only when a matched JSON payload is not valid JSON.
	pub fn rewrite(&self, text: &str) -> MdccResult<Vec<Segment>> {
		let mut segments = Vec::new();
		let mut cursor = 0;

		for directive in self.matcher.find_iter(text) {
			if directive.start() > cursor {
				segments.push(text_segment(text, cursor..directive.start()));
			}

			let component = self.build_component(&directive)?;
			tracing::debug!(
				name = %component.name,
				start = directive.start(),
				end = directive.end(),
				"matched directive"
			);
			segments.push(Segment::Component(component));
			cursor = directive.end();
		}

		if cursor < text.len() || segments.is_empty() {
			segments.push(text_segment(text, cursor..text.len()));
		}

		Ok(segments)
	}

	fn build_component(&self, directive: &DirectiveMatch<'_>) -> MdccResult<Component> {
		let (name, props) = match &directive.payload {
			Payload::Json(object) => {
				let props = match object {
					Some(source) => Props::from_json_object(directive.name, source)?,
					None => Props::default(),
				};
				(directive.name.to_string(), props)
			}
			Payload::Attributes(attributes) => {
				let mut builder = Props::builder();

				for attribute in attributes {
					let value = match attribute.value {
						RawValue::Quoted(value) | RawValue::Unquoted(value) => PropValue::from(value),
						RawValue::Flag => PropValue::Bool(true),
					};
					builder.insert(attribute.key, value);
				}

				let props = builder.build();
				let name = props
					.get("name")
					.and_then(PropValue::as_str)
					.unwrap_or_default()
					.to_string();
				(name, props)
			}
		};

		Ok(Component {
			tag_name: self.config.tag_name.clone(),
			name,
			props,
			span: directive.span.clone(),
		})
	}
}

fn text_segment(text: &str, span: Range<usize>) -> Segment {
	Segment::Text(TextFragment {
		value: text[span.clone()].to_string(),
		span,
	})
}
