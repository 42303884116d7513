// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Drawing the evaluated call tree.

use std::io::Write;

use colored::Colorize;
use studio_core::{Completion, NodeKind, Position, TreeNode};
use studio_sourcemap::PositionMapper;

use crate::error::{RenderError, Result};

const CALL_BRANCH: &str = "├─ ";
const CALL_LAST: &str = "└─ ";
const API_BRANCH: &str = "├┄ ";
const API_LAST: &str = "└┄ ";
const INDENT_OPEN: &str = "│  ";
const INDENT_CLOSED: &str = "   ";

/// Where a node sits in the tree.
#[derive(Debug, Clone, Copy)]
struct Placement<'p> {
	indent: &'p str,
	is_root: bool,
	is_last: bool,
	is_api: bool,
	parent_file: Option<&'p str>,
}

impl Placement<'_> {
	fn connector(&self) -> &'static str {
		match (self.is_root, self.is_api, self.is_last) {
			(true, _, _) => "",
			(false, false, false) => CALL_BRANCH,
			(false, false, true) => CALL_LAST,
			(false, true, false) => API_BRANCH,
			(false, true, true) => API_LAST,
		}
	}

	fn child_indent(&self) -> String {
		match (self.is_root, self.is_last) {
			(true, _) => self.indent.to_string(),
			(false, true) => format!("{}{INDENT_CLOSED}", self.indent),
			(false, false) => format!("{}{INDENT_OPEN}", self.indent),
		}
	}
}

/// Parse a node's `line:column` location.
pub fn parse_node_loc(loc: &str) -> Option<Position> {
	let mut parts = loc.trim().splitn(3, ':');
	let line = parts.next()?.parse().ok()?;
	let column = parts.next()?.parse().ok()?;
	Some(Position::new(line, column))
}

/// Renders call trees with line-drawing connectors.
#[derive(Debug, Clone, Copy)]
pub struct CallTreeRenderer<'a> {
	mapper: PositionMapper<'a>,
}

impl<'a> CallTreeRenderer<'a> {
	pub fn new(mapper: PositionMapper<'a>) -> Self {
		Self { mapper }
	}

	pub fn render<W: Write>(&self, out: &mut W, nodes: &[TreeNode]) -> Result<()> {
		for node in nodes {
			self.render_node(
				out,
				node,
				Placement {
					indent: "",
					is_root: true,
					is_last: false,
					is_api: false,
					parent_file: None,
				},
			)?;
		}
		Ok(())
	}

	fn render_node<W: Write>(&self, out: &mut W, node: &TreeNode, place: Placement<'_>) -> Result<()> {
		let file = self.node_file(node);
		let label = self.label(node, file.as_deref(), place.parent_file)?;

		let connector = if place.is_api {
			place.connector().dimmed().to_string()
		} else {
			place.connector().to_string()
		};
		writeln!(out, "{}{connector}{label}", place.indent)?;

		let indent = place.child_indent();
		// Nodes without a resolvable origin inherit their parent's file.
		let parent_file = file.as_deref().or(place.parent_file);
		let children: Vec<(&TreeNode, bool)> = node
			.calls
			.iter()
			.map(|child| (child, false))
			.chain(node.api_nodes().iter().map(|child| (child, true)))
			.collect();
		let count = children.len();

		for (index, (child, is_api)) in children.into_iter().enumerate() {
			self.render_node(
				out,
				child,
				Placement {
					indent: &indent,
					is_root: false,
					is_last: index + 1 == count,
					is_api,
					parent_file,
				},
			)?;
		}
		Ok(())
	}

	fn node_file(&self, node: &TreeNode) -> Option<String> {
		let position = node.loc.as_deref().and_then(parse_node_loc)?;
		self.mapper.resolve(position).file
	}

	fn label(&self, node: &TreeNode, file: Option<&str>, parent_file: Option<&str>) -> Result<String> {
		let mut label = String::new();

		let symbol = match node.kind {
			NodeKind::Function => "ƒ ",
			NodeKind::New => {
				label.push_str(&"new ".blue().to_string());
				"ƒ "
			}
			NodeKind::Property => "◆ ",
			NodeKind::Event => "⚑ ",
			NodeKind::Unsupported => {
				return Err(RenderError::UnsupportedNode {
					name: node.name.clone(),
				})
			}
		};

		if node.has_apis() {
			label.push_str(&format!("{symbol}{}", node.name).bold().cyan().to_string());
		} else {
			label.push_str(&node.name);
		}

		if node.count > 1 {
			label.push_str(&format!(" ×{}", node.count).dimmed().to_string());
		}

		match node.completion() {
			Some(Completion::Error) => label.push_str(&" error".red().to_string()),
			Some(Completion::Unknown) => label.push_str(&" unknown".yellow().to_string()),
			Some(Completion::Throw) => label.push_str(&" throw".magenta().to_string()),
			Some(Completion::Other) | None => {}
		}

		if let Some(file) = file {
			if Some(file) != parent_file {
				label.push_str(&format!("  {file}").dimmed().to_string());
			}
		}

		Ok(label)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use studio_sourcemap::{SourceMap, STDIN_SOURCE};

	fn plain() {
		colored::control::set_override(false);
	}

	fn render(renderer: &CallTreeRenderer<'_>, nodes: &[TreeNode]) -> String {
		let mut out = Vec::new();
		renderer.render(&mut out, nodes).unwrap();
		String::from_utf8(out).unwrap()
	}

	fn node(name: &str, kind: NodeKind) -> TreeNode {
		TreeNode::new(name, kind)
	}

	#[test]
	fn draws_nested_branches() {
		plain();
		let mut root = node("main", NodeKind::Function);
		let mut first = node("first", NodeKind::Function);
		first.calls = vec![node("inner", NodeKind::Property)];
		root.calls = vec![first, node("second", NodeKind::Function)];

		let text = render(&CallTreeRenderer::new(PositionMapper::new(None)), &[root]);

		assert_eq!(text, "main\n├─ first\n│  └─ inner\n└─ second\n");
	}

	#[test]
	fn closed_branches_indent_with_spaces() {
		plain();
		let mut root = node("main", NodeKind::Function);
		let mut last = node("last", NodeKind::Function);
		last.calls = vec![node("deep", NodeKind::Function)];
		root.calls = vec![last];

		let text = render(&CallTreeRenderer::new(PositionMapper::new(None)), &[root]);

		assert_eq!(text, "main\n└─ last\n   └─ deep\n");
	}

	#[test]
	fn apis_follow_calls_with_distinct_connectors() {
		plain();
		let mut root = node("module", NodeKind::Function);
		root.calls = vec![node("init", NodeKind::Function)];
		root.apis = Some(vec![node("Widget", NodeKind::New), node("version", NodeKind::Property)]);

		let text = render(&CallTreeRenderer::new(PositionMapper::new(None)), &[root]);

		assert_eq!(
			text,
			"ƒ module\n├─ init\n├┄ new Widget\n└┄ version\n"
		);
	}

	#[test]
	fn annotates_count_and_top_completion() {
		plain();
		let mut root = node("loop", NodeKind::Function);
		root.count = 3;
		root.completions = vec![Completion::Unknown, Completion::Error];

		let text = render(&CallTreeRenderer::new(PositionMapper::new(None)), &[root]);

		assert_eq!(text, "loop ×3 error\n");
		assert!(!text.contains("unknown"));
	}

	#[test]
	fn shows_file_only_when_it_changes() {
		plain();
		let map = SourceMap::from_json(
			r#"{ "version": 3, "sources": ["a.js", "b.js"], "names": [], "mappings": "AAAA;AAAA;ACAA" }"#,
		)
		.unwrap();
		let renderer = CallTreeRenderer::new(PositionMapper::new(Some(&map)));

		let mut root = node("main", NodeKind::Function);
		root.loc = Some("1:0".to_string());
		let mut same = node("same", NodeKind::Function);
		same.loc = Some("2:0".to_string());
		let mut other = node("other", NodeKind::Function);
		other.loc = Some("3:0".to_string());
		let mut unmapped = node("unmapped", NodeKind::Function);
		unmapped.loc = Some("9:0".to_string());
		same.calls = vec![other];
		root.calls = vec![same, unmapped];

		let text = render(&renderer, &[root]);

		assert_eq!(
			text,
			"main  a.js\n├─ same\n│  └─ other  b.js\n└─ unmapped\n"
		);
	}

	#[test]
	fn unmapped_node_passes_its_parent_file_down() {
		plain();
		let map = SourceMap::from_json(
			r#"{ "version": 3, "sources": ["a.js", "b.js"], "names": [], "mappings": "AAAA;AAAA;ACAA" }"#,
		)
		.unwrap();
		let renderer = CallTreeRenderer::new(PositionMapper::new(Some(&map)));

		let mut root = node("main", NodeKind::Function);
		root.loc = Some("1:0".to_string());
		let mut unmapped = node("unmapped", NodeKind::Function);
		unmapped.loc = Some("9:0".to_string());
		let mut same = node("same", NodeKind::Function);
		same.loc = Some("2:0".to_string());
		let mut other = node("other", NodeKind::Function);
		other.loc = Some("3:0".to_string());
		unmapped.calls = vec![same, other];
		root.calls = vec![unmapped];

		let text = render(&renderer, &[root]);

		assert_eq!(
			text,
			"main  a.js\n└─ unmapped\n   ├─ same\n   └─ other  b.js\n"
		);
	}

	#[test]
	fn root_without_map_is_labeled_stdin() {
		plain();
		let mut root = node("main", NodeKind::Function);
		root.loc = Some("4:2".to_string());
		let text = render(&CallTreeRenderer::new(PositionMapper::new(None)), &[root]);
		assert_eq!(text, format!("main  {STDIN_SOURCE}\n"));
	}

	#[test]
	fn unsupported_node_aborts() {
		plain();
		let mut root = node("main", NodeKind::Function);
		root.calls = vec![node("gen", NodeKind::Unsupported)];
		let mut out = Vec::new();
		let result = CallTreeRenderer::new(PositionMapper::new(None)).render(&mut out, &[root]);
		assert!(matches!(result, Err(RenderError::UnsupportedNode { name }) if name == "gen"));
	}

	#[test]
	fn parses_node_locations() {
		assert_eq!(parse_node_loc("12:4"), Some(Position::new(12, 4)));
		assert_eq!(parse_node_loc("12:4:extra"), Some(Position::new(12, 4)));
		assert_eq!(parse_node_loc("bundle.js"), None);
	}
}
