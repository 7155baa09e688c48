use super::{ChunkTree, Chunker, TaggedToken};
use crate::error::Result;
use crate::language::Language;

/// Label of the root node of every chunk tree.
pub const ROOT_LABEL: &str = "S";

/// Label of noun-phrase chunks.
pub const NP_LABEL: &str = "NP";

/// How a tag is matched.
#[derive(Clone, Copy, Debug)]
enum TagPattern {
	/// `<DT>`
	Exact(&'static str),
	/// `<NN.*>`
	Prefix(&'static str),
}

impl TagPattern {
	fn matches(self, tag: &str) -> bool {
		match self {
			TagPattern::Exact(expected) => tag == expected,
			TagPattern::Prefix(prefix) => tag.starts_with(prefix),
		}
	}
}

/// How many consecutive tags a pattern may consume.
#[derive(Clone, Copy, Debug)]
enum Repeat {
	/// `?`
	Optional,
	/// `*`
	Any,
	/// `+`
	AtLeastOne,
}

/// One chunk rule: a sequence of repeated tag patterns.
type Rule = &'static [(TagPattern, Repeat)];

/// `NP: {<DT>?<JJ.*>*<NN.*>+}`
const ENGLISH_NP: &[Rule] = &[&[
	(TagPattern::Exact("DT"), Repeat::Optional),
	(TagPattern::Prefix("JJ"), Repeat::Any),
	(TagPattern::Prefix("NN"), Repeat::AtLeastOne),
]];

/// `NP: {<noun.*>+<adj.*>*}` then `{<digit>+}`
const ARABIC_NP: &[Rule] = &[
	&[(TagPattern::Prefix("noun"), Repeat::AtLeastOne), (TagPattern::Prefix("adj"), Repeat::Any)],
	&[(TagPattern::Exact("digit"), Repeat::AtLeastOne)],
];

/// Groups POS-tagged tokens into flat noun-phrase chunks.
///
/// Scans left to right; at each position the rules are tried in order and
/// the first one that matches opens an `NP` chunk. Patterns are greedy and
/// never backtrack, which is exact for these rules since their tag classes
/// are disjoint. Tokens outside any chunk stay as leaves of the root.
#[derive(Clone, Copy, Debug)]
pub struct NounPhraseChunker {
	rules: &'static [Rule],
}

impl NounPhraseChunker {
	pub fn for_language(language: Language) -> Self {
		let rules = match language {
			Language::English => ENGLISH_NP,
			Language::Arabic => ARABIC_NP,
		};
		Self { rules }
	}

	/// Length of the match of `rule` at the start of `tagged` (0 if none).
	fn match_rule(rule: Rule, tagged: &[TaggedToken]) -> usize {
		let mut pos = 0;
		for &(pattern, repeat) in rule {
			let max = match repeat {
				Repeat::Optional => 1,
				Repeat::Any | Repeat::AtLeastOne => usize::MAX,
			};
			let taken = tagged[pos..]
				.iter()
				.take(max)
				.take_while(|t| pattern.matches(&t.tag))
				.count();
			if matches!(repeat, Repeat::AtLeastOne) && taken == 0 {
				return 0;
			}
			pos += taken;
		}
		pos
	}
}

impl Chunker for NounPhraseChunker {
	fn chunk(&self, tagged: &[TaggedToken]) -> Result<ChunkTree> {
		let mut children = Vec::new();
		let mut i = 0;
		while i < tagged.len() {
			let len = self
				.rules
				.iter()
				.map(|&rule| Self::match_rule(rule, &tagged[i..]))
				.find(|&len| len > 0)
				.unwrap_or(0);

			if len == 0 {
				children.push(ChunkTree::Leaf(tagged[i].clone()));
				i += 1;
			} else {
				children.push(ChunkTree::Node {
					label: NP_LABEL.to_owned(),
					children: tagged[i..i + len].iter().cloned().map(ChunkTree::Leaf).collect(),
				});
				i += len;
			}
		}
		Ok(ChunkTree::Node { label: ROOT_LABEL.to_owned(), children })
	}
}
