//! Single expansion passes over parsed prompt text.

use rand::Rng;

use crate::grammar::{parse, MultiSelect, Node, OptionBlock, SelectRange};
use crate::selection::{choose, choose_indices, WeightedOption};
use crate::store::WildcardStore;

/// Evaluates one pass of option blocks or wildcard references.
///
/// Both passes walk the same parsed nodes; each one expands its own construct
/// and re-emits the other verbatim, so a pass never consumes randomness for
/// syntax it leaves alone.
///
/// A pass never produces more than `max_bytes` (or its input length, if
/// that is larger): an expansion that would overflow is replaced by its
/// source text and the pass is marked as having hit the limit.
pub(crate) struct Expander<'a, R: Rng + ?Sized> {
    store: &'a WildcardStore,
    rng: &'a mut R,
    max_bytes: usize,
    hit_limit: bool,
}

impl<'a, R: Rng + ?Sized> Expander<'a, R> {
    pub(crate) fn new(store: &'a WildcardStore, rng: &'a mut R, max_bytes: usize) -> Self {
        Self {
            store,
            rng,
            max_bytes,
            hit_limit: false,
        }
    }

    /// Whether any expansion so far was held back by the byte limit.
    pub(crate) fn hit_limit(&self) -> bool {
        self.hit_limit
    }

    /// Replaces every option block with its selection. Wildcards are kept.
    pub(crate) fn expand_options(&mut self, text: &str) -> String {
        let nodes = parse(text);
        let mut out = String::with_capacity(text.len());
        let mut rest = text.len();
        for node in &nodes {
            rest -= node.source().len();
            match node {
                Node::Block(block) => {
                    let mut rendered = String::new();
                    self.render_block(block, &mut rendered);
                    self.push_within(&mut out, &rendered, &block.raw, rest);
                }
                other => out.push_str(other.source()),
            }
        }
        out
    }

    /// Replaces every resolvable wildcard with one of its options.
    ///
    /// Unresolvable references and option blocks are kept as written.
    pub(crate) fn expand_wildcards(&mut self, text: &str) -> String {
        let nodes = parse(text);
        let mut out = String::with_capacity(text.len());
        let mut rest = text.len();
        for node in &nodes {
            rest -= node.source().len();
            match node {
                Node::Wildcard(wildcard) => match self.pick_wildcard(&wildcard.key) {
                    Some(choice) => self.push_within(&mut out, &choice, &wildcard.raw, rest),
                    None => out.push_str(&wildcard.raw),
                },
                other => out.push_str(other.source()),
            }
        }
        out
    }

    /// Appends `expanded`, or `source` when `expanded` plus the `rest` bytes
    /// still to come would overflow the limit.
    fn push_within(&mut self, out: &mut String, expanded: &str, source: &str, rest: usize) {
        if out.len() + expanded.len() + rest <= self.max_bytes {
            out.push_str(expanded);
        } else {
            self.hit_limit = true;
            out.push_str(source);
        }
    }

    fn pick_wildcard(&mut self, key: &str) -> Option<String> {
        let list = self.store.resolve(key)?;
        let options: Vec<WeightedOption> =
            list.iter().map(|line| WeightedOption::parse(line)).collect();
        choose(&options, 1, self.rng).into_iter().next()
    }

    fn render_options(&mut self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Wildcard(wildcard) => out.push_str(&wildcard.raw),
                Node::Block(block) => self.render_block(block, out),
            }
        }
    }

    fn render_block(&mut self, block: &OptionBlock, out: &mut String) {
        let Some(select) = &block.select else {
            let picked = choose_indices(&block.weights(), 1, self.rng);
            if let Some(&index) = picked.first() {
                self.render_options(&block.options[index].nodes, out);
            }
            return;
        };

        if let Some(pool) = self.wildcard_pool(block) {
            let count = self.draw_count(select.range, pool.len());
            out.push_str(&choose(&pool, count, self.rng).join(&select.separator));
            return;
        }

        self.render_multi_select(block, select, out);
    }

    fn render_multi_select(
        &mut self,
        block: &OptionBlock,
        select: &MultiSelect,
        out: &mut String,
    ) {
        let count = self.draw_count(select.range, block.options.len());
        let picked = choose_indices(&block.weights(), count, self.rng);
        for (n, index) in picked.into_iter().enumerate() {
            if n > 0 {
                out.push_str(&select.separator);
            }
            self.render_options(&block.options[index].nodes, out);
        }
    }

    /// `{2$$__flower__}`: a multi-select whose only option references
    /// wildcards draws from the pooled lines of those wildcards.
    fn wildcard_pool(&self, block: &OptionBlock) -> Option<Vec<WeightedOption>> {
        let [only] = block.options.as_slice() else {
            return None;
        };
        let pool: Vec<WeightedOption> = only
            .wildcards()
            .filter_map(|wildcard| self.store.resolve(&wildcard.key))
            .flat_map(|list| {
                list.iter()
                    .map(|line| WeightedOption::parse(line))
                    .collect::<Vec<_>>()
            })
            .collect();
        if pool.is_empty() {
            None
        } else {
            Some(pool)
        }
    }

    fn draw_count(&mut self, range: SelectRange, available: usize) -> usize {
        let (low, high) = range.bounds(available);
        if low == high {
            low
        } else {
            self.rng.gen_range(low..=high)
        }
    }
}
