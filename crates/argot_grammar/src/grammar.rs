//! The compiled grammar arena.
//!
//! [`Grammar::new`] flattens an [`OptionDef`] tree into nodes addressed by
//! [`OptionId`]. Each node keeps its children in definition order and the id
//! of its parent, so paths are reconstructed by walking parent ids.

use std::fmt;

use argot_foundation::{Error, Result};
use tracing::debug;

use crate::option::{OptionDef, OptionKind, OptionSet, longest_name, remove_prefix};
use crate::rule::ArgumentsRule;

/// Stable index of a node in a [`Grammar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(u32);

impl OptionId {
    /// The arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A compiled option or command.
#[derive(Clone, Debug)]
pub struct OptionNode {
    aliases: Vec<String>,
    name: String,
    help: String,
    rule: ArgumentsRule,
    kind: OptionKind,
    children: Vec<OptionId>,
    parent: Option<OptionId>,
}

impl OptionNode {
    /// Raw aliases in definition order.
    #[must_use]
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// Longest alias without its prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Help text.
    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// Returns true if the node has no help text.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.help.trim().is_empty()
    }

    /// The arguments rule.
    #[must_use]
    pub fn rule(&self) -> &ArgumentsRule {
        &self.rule
    }

    /// Option or command.
    #[must_use]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns true for commands.
    #[must_use]
    pub fn is_command(&self) -> bool {
        matches!(self.kind, OptionKind::Command { .. })
    }

    /// Whether unclaimed tokens under this command are errors.
    #[must_use]
    pub fn treat_unmatched_tokens_as_errors(&self) -> bool {
        match self.kind {
            OptionKind::Command {
                treat_unmatched_tokens_as_errors,
            } => treat_unmatched_tokens_as_errors,
            OptionKind::Option => false,
        }
    }

    /// Child nodes in definition order.
    #[must_use]
    pub fn children(&self) -> &[OptionId] {
        &self.children
    }

    /// Parent node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<OptionId> {
        self.parent
    }

    /// Exact alias comparison.
    #[must_use]
    pub fn has_raw_alias(&self, alias: &str) -> bool {
        self.aliases.iter().any(|a| a == alias)
    }

    /// Alias comparison that also accepts the alias without its prefix.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.has_raw_alias(alias) || self.aliases.iter().any(|a| remove_prefix(a) == alias)
    }
}

fn in_frame(err: Error, command: &str) -> Error {
    let context = err
        .context
        .clone()
        .unwrap_or_default()
        .with_frame(command);
    err.with_context(context)
}

/// Immutable grammar shared by every parse.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    nodes: Vec<OptionNode>,
    top_level: Vec<OptionId>,
}

impl Grammar {
    /// Compiles option definitions.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAlias` if two siblings anywhere in the tree share an
    /// alias. The error context names the enclosing commands.
    pub fn new(options: impl IntoIterator<Item = OptionDef>) -> Result<Self> {
        let mut grammar = Self::default();
        let top = OptionSet::from_options(options)?;
        for def in top.into_vec() {
            let id = grammar.insert(def, None)?;
            grammar.top_level.push(id);
        }
        debug!(
            nodes = grammar.nodes.len(),
            top_level = grammar.top_level.len(),
            "compiled grammar"
        );
        Ok(grammar)
    }

    fn insert(&mut self, def: OptionDef, parent: Option<OptionId>) -> Result<OptionId> {
        let (aliases, help, rule, kind, children) = def.into_parts();
        let name = longest_name(&aliases);
        let children =
            OptionSet::from_options(children).map_err(|err| in_frame(err, &name))?;

        let index = u32::try_from(self.nodes.len())
            .map_err(|_| Error::internal("grammar has too many options"))?;
        let id = OptionId(index);
        self.nodes.push(OptionNode {
            aliases,
            name,
            help,
            rule,
            kind,
            children: Vec::new(),
            parent,
        });

        for child in children.into_vec() {
            let child_id = self
                .insert(child, Some(id))
                .map_err(|err| in_frame(err, &self.nodes[id.index()].name))?;
            self.nodes[id.index()].children.push(child_id);
        }
        Ok(id)
    }

    /// Returns the node for `id`.
    ///
    /// Ids are only valid for the grammar that produced them.
    #[must_use]
    pub fn node(&self, id: OptionId) -> &OptionNode {
        &self.nodes[id.index()]
    }

    /// Top-level node ids.
    #[must_use]
    pub fn top_level(&self) -> &[OptionId] {
        &self.top_level
    }

    /// Children of `scope`, or the top level when `scope` is `None`.
    #[must_use]
    pub fn scope(&self, scope: Option<OptionId>) -> &[OptionId] {
        match scope {
            Some(id) => self.node(id).children(),
            None => &self.top_level,
        }
    }

    /// Looks up a child of `scope` by exact alias, then without prefix.
    #[must_use]
    pub fn find(&self, scope: Option<OptionId>, alias: &str) -> Option<OptionId> {
        let siblings = self.scope(scope);
        siblings
            .iter()
            .copied()
            .find(|&id| self.node(id).has_raw_alias(alias))
            .or_else(|| {
                siblings
                    .iter()
                    .copied()
                    .find(|&id| self.node(id).has_alias(alias))
            })
    }

    /// Looks up a child of `scope` by exact alias only.
    #[must_use]
    pub fn find_raw(&self, scope: Option<OptionId>, alias: &str) -> Option<OptionId> {
        self.scope(scope)
            .iter()
            .copied()
            .find(|&id| self.node(id).has_raw_alias(alias))
    }

    /// Ids from the top level down to `id`, inclusive.
    #[must_use]
    pub fn path(&self, id: OptionId) -> Vec<OptionId> {
        let mut path = vec![id];
        let mut current = self.node(id).parent();
        while let Some(parent) = current {
            path.push(parent);
            current = self.node(parent).parent();
        }
        path.reverse();
        path
    }

    /// Node names from the top level down to `id`, joined with spaces.
    #[must_use]
    pub fn path_name(&self, id: OptionId) -> String {
        self.path(id)
            .into_iter()
            .map(|i| self.node(i).name())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the grammar defines nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every node in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| {
            #[allow(clippy::cast_possible_truncation)]
            let id = OptionId(i as u32);
            (id, node)
        })
    }
}
