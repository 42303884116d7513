// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Call tree of functions and properties evaluated during analysis.

use serde::{Deserialize, Deserializer, Serialize};

/// What kind of evaluation a tree node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
	Function,
	Property,
	Event,
	/// A constructor call.
	New,
	/// A node type this client does not know how to draw.
	#[serde(other)]
	Unsupported,
}

/// How an evaluation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
	Error,
	Unknown,
	Throw,
	#[serde(other)]
	Other,
}

impl Completion {
	/// Display priority, highest first.
	pub const PRIORITY: [Completion; 3] = [Self::Error, Self::Unknown, Self::Throw];
}

/// One node of the call tree. Parents own their children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
	pub name: String,
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Generated `line:column` where the evaluated code lives.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub loc: Option<String>,
	#[serde(default = "one", deserialize_with = "at_least_one")]
	pub count: u32,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub completions: Vec<Completion>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub calls: Vec<TreeNode>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub apis: Option<Vec<TreeNode>>,
}

impl TreeNode {
	pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
		Self {
			name: name.into(),
			kind,
			loc: None,
			count: 1,
			completions: Vec::new(),
			calls: Vec::new(),
			apis: None,
		}
	}

	/// The highest priority completion recorded on this node.
	pub fn completion(&self) -> Option<Completion> {
		Completion::PRIORITY
			.into_iter()
			.find(|candidate| self.completions.contains(candidate))
	}

	/// Whether this node describes an API entry point.
	pub fn has_apis(&self) -> bool {
		self.apis.is_some()
	}

	/// Child API nodes, empty when the node has none.
	pub fn api_nodes(&self) -> &[TreeNode] {
		self.apis.as_deref().unwrap_or_default()
	}
}

fn one() -> u32 {
	1
}

fn at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
	D: Deserializer<'de>,
{
	let count = u32::deserialize(deserializer)?;
	if count == 0 {
		return Err(serde::de::Error::invalid_value(
			serde::de::Unexpected::Unsigned(0),
			&"a count of at least 1",
		));
	}
	Ok(count)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn error_beats_unknown_and_throw() {
		let mut node = TreeNode::new("run", NodeKind::Function);
		node.completions = vec![Completion::Unknown, Completion::Throw, Completion::Error];
		assert_eq!(node.completion(), Some(Completion::Error));

		node.completions = vec![Completion::Throw, Completion::Unknown];
		assert_eq!(node.completion(), Some(Completion::Unknown));

		node.completions = vec![Completion::Other];
		assert_eq!(node.completion(), None);
	}

	#[test]
	fn decodes_nested_tree() {
		let node: TreeNode = serde_json::from_str(
			r#"{
				"name": "main",
				"type": "function",
				"loc": "1:0",
				"completions": ["unknown", "error", "timeout"],
				"calls": [{ "name": "helper", "type": "property", "count": 3 }],
				"apis": [{ "name": "fetch", "type": "new" }]
			}"#,
		)
		.unwrap();

		assert_eq!(node.count, 1);
		assert_eq!(node.completion(), Some(Completion::Error));
		assert_eq!(node.calls[0].count, 3);
		assert_eq!(node.calls[0].kind, NodeKind::Property);
		assert!(node.has_apis());
		assert_eq!(node.api_nodes()[0].kind, NodeKind::New);
	}

	#[test]
	fn unknown_kind_is_kept_for_the_renderer() {
		let node: TreeNode = serde_json::from_str(r#"{ "name": "x", "type": "generator" }"#).unwrap();
		assert_eq!(node.kind, NodeKind::Unsupported);
	}

	#[test]
	fn rejects_zero_count() {
		let result = serde_json::from_str::<TreeNode>(r#"{ "name": "x", "type": "function", "count": 0 }"#);
		assert!(result.is_err());
	}
}
