use markdown::Constructs;
use markdown::ParseOptions;
use markdown::mdast::AttributeContent;
use markdown::mdast::AttributeValue;
use markdown::mdast::AttributeValueExpression;
use markdown::mdast::Html;
use markdown::mdast::MdxJsxAttribute;
use markdown::mdast::MdxJsxTextElement;
use markdown::mdast::Node;
use markdown::mdast::Text;
use markdown::to_mdast;
use serde::Serialize;

use crate::Component;
use crate::MdccError;
use crate::MdccResult;
use crate::Rewriter;
use crate::Segment;
use crate::should_splice;

/// Counts gathered while transforming a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransformSummary {
	/// Text and html nodes that were replaced by a rewritten sequence.
	pub nodes_rewritten: usize,
	/// Components inserted into the tree.
	pub components: usize,
}

/// A component found by [`collect_components`], with the line of the node it
/// was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundComponent {
	/// 1-based line of the text node containing the directive, when the tree
	/// carries positions.
	pub line: Option<usize>,
	#[serde(flatten)]
	pub component: Component,
}

/// The two node kinds whose string content is scanned for directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
	/// Plain `text` nodes.
	Text,
	/// Raw `html` nodes, where the parser leaves `<Element attr />`
	/// shaped text unparsed.
	Html,
}

impl SourceKind {
	fn of(node: &Node) -> Option<(Self, &str)> {
		match node {
			Node::Text(text) => Some((Self::Text, &text.value)),
			Node::Html(html) => Some((Self::Html, &html.value)),
			_ => None,
		}
	}

	fn fragment(self, value: String) -> Node {
		match self {
			Self::Text => {
				Node::Text(Text {
					value,
					position: None,
				})
			}
			Self::Html => {
				Node::Html(Html {
					value,
					position: None,
				})
			}
		}
	}
}

/// Parse markdown content into an mdast tree using GFM options.
///
/// Autolink literals are turned off: a bare URL inside a JSON payload would
/// otherwise split the directive across a `link` node.
pub fn parse_markdown(content: impl AsRef<str>) -> MdccResult<Node> {
	let options = ParseOptions {
		constructs: Constructs {
			gfm_autolink_literal: false,
			..Constructs::gfm()
		},
		..ParseOptions::gfm()
	};
	to_mdast(content.as_ref(), &options).map_err(|e| MdccError::Markdown(e.to_string()))
}

/// Parse markdown content and rewrite every directive in it.
pub fn process(content: impl AsRef<str>, rewriter: &Rewriter) -> MdccResult<Node> {
	let mut tree = parse_markdown(content)?;
	transform(&mut tree, rewriter)?;
	Ok(tree)
}

/// Rewrite every `text` and `html` node in `tree` in place.
///
/// Each original node is visited once. The nodes spliced in for it are
/// skipped, so generated text fragments are never rescanned. Nodes without
/// directives are left exactly as they were.
#[tracing::instrument(level = "debug", skip_all)]
pub fn transform(tree: &mut Node, rewriter: &Rewriter) -> MdccResult<TransformSummary> {
	let mut summary = TransformSummary::default();

	if let Some(children) = tree.children_mut() {
		transform_children(children, rewriter, &mut summary)?;
	}

	tracing::debug!(
		nodes_rewritten = summary.nodes_rewritten,
		components = summary.components,
		"transformed tree"
	);

	Ok(summary)
}

fn transform_children(
	children: &mut Vec<Node>,
	rewriter: &Rewriter,
	summary: &mut TransformSummary,
) -> MdccResult<()> {
	let mut index = 0;

	while index < children.len() {
		let replacement = match SourceKind::of(&children[index]) {
			Some((kind, value)) => rewrite_node(kind, value, rewriter, summary)?,
			None => None,
		};

		if let Some(nodes) = replacement {
			let inserted = nodes.len();
			children.splice(index..=index, nodes);
			index += inserted;
			continue;
		}

		if let Some(grandchildren) = children[index].children_mut() {
			transform_children(grandchildren, rewriter, summary)?;
		}

		index += 1;
	}

	Ok(())
}

fn rewrite_node(
	kind: SourceKind,
	value: &str,
	rewriter: &Rewriter,
	summary: &mut TransformSummary,
) -> MdccResult<Option<Vec<Node>>> {
	let segments = rewriter.rewrite(value)?;

	if !should_splice(&segments) {
		return Ok(None);
	}

	let mut nodes = Vec::with_capacity(segments.len());

	for segment in segments {
		match segment {
			Segment::Text(fragment) => nodes.push(kind.fragment(fragment.value)),
			Segment::Component(component) => {
				summary.components += 1;
				nodes.push(component_node(component)?);
			}
		}
	}

	summary.nodes_rewritten += 1;
	tracing::debug!(?kind, nodes = nodes.len(), "spliced rewritten node");

	Ok(Some(nodes))
}

/// Convert a component into a childless `mdxJsxTextElement`.
///
/// The element is named after the tag name and carries two attributes: a
/// literal `name` and a `props` expression holding the props as JSON.
pub fn component_node(component: Component) -> MdccResult<Node> {
	let props = serde_json::to_string(&component.props)?;

	Ok(Node::MdxJsxTextElement(MdxJsxTextElement {
		children: vec![],
		position: None,
		name: Some(component.tag_name),
		attributes: vec![
			AttributeContent::Property(MdxJsxAttribute {
				name: "name".to_string(),
				value: Some(AttributeValue::Literal(component.name)),
			}),
			AttributeContent::Property(MdxJsxAttribute {
				name: "props".to_string(),
				value: Some(AttributeValue::Expression(AttributeValueExpression {
					value: props,
					stops: vec![],
				})),
			}),
		],
	}))
}

/// Find every component in `tree` without modifying it.
pub fn collect_components(tree: &Node, rewriter: &Rewriter) -> MdccResult<Vec<FoundComponent>> {
	let mut found = Vec::new();
	collect_into(tree, rewriter, &mut found)?;
	Ok(found)
}

fn collect_into(node: &Node, rewriter: &Rewriter, found: &mut Vec<FoundComponent>) -> MdccResult<()> {
	if let Some((_, value)) = SourceKind::of(node) {
		let line = node.position().map(|position| position.start.line);
		let components = rewriter
			.rewrite(value)?
			.into_iter()
			.filter_map(|segment| {
				match segment {
					Segment::Component(component) => Some(FoundComponent { line, component }),
					Segment::Text(_) => None,
				}
			});
		found.extend(components);
		return Ok(());
	}

	if let Some(children) = node.children() {
		for child in children {
			collect_into(child, rewriter, found)?;
		}
	}

	Ok(())
}
