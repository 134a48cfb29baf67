//! The applied-option tree.
//!
//! Every grammar node matched during a parse becomes an [`AppliedNode`] in an
//! [`AppliedTree`] arena. Nodes hold the arguments they consumed, grouped by
//! occurrence, and an [`ArgumentState`]:
//!
//! | from     | event                                   | to       |
//! |----------|-----------------------------------------|----------|
//! | (new)    | option applied                          | `Open`   |
//! | `Open`   | any token offered to a non-command node | `Closed` |
//! | `Closed` | same alias named again                  | `Open`   |
//!
//! Commands ignore the state and keep accepting positional arguments.
//! Acceptance itself is the pure [`try_accept`].

use std::collections::VecDeque;
use std::fmt;

use argot_foundation::{Error, Messages, Result, Value};
use argot_grammar::{ArgumentList, Grammar, OptionId, OptionNode, Phase, RuleContext};
use tracing::trace;

use crate::config::ParserConfiguration;
use crate::result::OptionError;
use crate::token::{Token, TokenKind};

/// Stable index of a node in an [`AppliedTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppliedId(u32);

impl AppliedId {
    /// The arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node will consider another argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentState {
    /// Accepting an argument.
    Open,
    /// Closed until its alias is named again.
    Closed,
}

/// A grammar node matched during a parse.
#[derive(Clone, Debug)]
pub struct AppliedNode {
    option: OptionId,
    token: String,
    arguments: ArgumentList,
    children: Vec<AppliedId>,
    parent: Option<AppliedId>,
    state: ArgumentState,
}

impl AppliedNode {
    /// The grammar node.
    #[must_use]
    pub fn option(&self) -> OptionId {
        self.option
    }

    /// The alias by which the node was first applied.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Arguments consumed so far, without any default.
    #[must_use]
    pub fn arguments(&self) -> &ArgumentList {
        &self.arguments
    }

    /// Applied children in application order.
    #[must_use]
    pub fn children(&self) -> &[AppliedId] {
        &self.children
    }

    /// The applied parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<AppliedId> {
        self.parent
    }

    /// Current argument state.
    #[must_use]
    pub fn state(&self) -> ArgumentState {
        self.state
    }
}

/// A candidate argument that an option's rule refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RejectedToken {
    /// The refused argument.
    pub token: String,
    /// The rule's message.
    pub reason: String,
}

/// Decides whether `node` can take `candidate` as its next argument.
///
/// Runs the structural part of the node's rule against the current
/// occurrence with `candidate` appended. On success returns the new argument
/// list; the node itself is not modified.
///
/// # Errors
///
/// Returns [`RejectedToken`] with the rule's message if the candidate would
/// break the rule.
pub fn try_accept(
    grammar: &Grammar,
    messages: &Messages,
    node: &AppliedNode,
    applied_children: &[OptionId],
    candidate: &str,
) -> std::result::Result<ArgumentList, RejectedToken> {
    let arguments = node.arguments.with(candidate);
    let context = RuleContext::new(grammar, node.option, &arguments, applied_children, messages);
    match grammar.node(node.option).rule().validate(&context, Phase::Accept) {
        None => Ok(arguments),
        Some(reason) => Err(RejectedToken {
            token: candidate.to_string(),
            reason,
        }),
    }
}

/// Arena of applied nodes.
#[derive(Clone, Debug, Default)]
pub struct AppliedTree {
    nodes: Vec<AppliedNode>,
    roots: Vec<AppliedId>,
}

impl AppliedTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node for `id`.
    #[must_use]
    pub fn node(&self, id: AppliedId) -> &AppliedNode {
        &self.nodes[id.index()]
    }

    /// Top-level nodes in application order.
    #[must_use]
    pub fn roots(&self) -> &[AppliedId] {
        &self.roots
    }

    /// Returns true if nothing was applied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every reachable node, breadth-first from the roots.
    #[must_use]
    pub fn breadth_first(&self) -> Vec<AppliedId> {
        self.breadth_first_from(&self.roots)
    }

    /// Nodes reachable from `starts`, breadth-first, starts included.
    #[must_use]
    pub fn breadth_first_from(&self, starts: &[AppliedId]) -> Vec<AppliedId> {
        let mut order = Vec::new();
        let mut queue: VecDeque<AppliedId> = starts.iter().copied().collect();
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.node(id).children.iter().copied());
        }
        order
    }

    /// Grammar ids of `id`'s applied children.
    #[must_use]
    pub fn child_options(&self, id: AppliedId) -> Vec<OptionId> {
        self.node(id)
            .children
            .iter()
            .map(|&child| self.node(child).option)
            .collect()
    }

    /// Arguments with the rule's default standing in for an empty list.
    #[must_use]
    pub fn effective_arguments(&self, grammar: &Grammar, id: AppliedId) -> ArgumentList {
        let node = self.node(id);
        if node.arguments.is_empty() {
            if let Some(default) = grammar.node(node.option).rule().default_value() {
                return ArgumentList::from_values([default]);
            }
        }
        node.arguments.clone()
    }

    /// Runs the full rule for `id`. `None` means valid.
    #[must_use]
    pub fn validate(&self, config: &ParserConfiguration, id: AppliedId) -> Option<String> {
        let grammar = config.grammar();
        let node = self.node(id);
        let arguments = self.effective_arguments(grammar, id);
        let children = self.child_options(id);
        let context = RuleContext::new(
            grammar,
            node.option,
            &arguments,
            &children,
            config.messages(),
        );
        grammar
            .node(node.option)
            .rule()
            .validate(&context, Phase::Final)
    }

    pub(crate) fn apply(
        &mut self,
        option: OptionId,
        token: &str,
        parent: Option<AppliedId>,
    ) -> AppliedId {
        #[allow(clippy::cast_possible_truncation)]
        let id = AppliedId(self.nodes.len() as u32);
        self.nodes.push(AppliedNode {
            option,
            token: token.to_string(),
            arguments: ArgumentList::new(),
            children: Vec::new(),
            parent,
            state: ArgumentState::Open,
        });
        match parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn respecify(&mut self, id: AppliedId) {
        let node = &mut self.nodes[id.index()];
        node.state = ArgumentState::Open;
        node.arguments.start_occurrence();
    }

    /// Makes `root`'s children the top level.
    pub(crate) fn strip_root(&mut self, root: AppliedId) {
        let children = std::mem::take(&mut self.nodes[root.index()].children);
        for &child in &children {
            self.nodes[child.index()].parent = None;
        }
        self.roots = children;
    }

    /// Offers `token` to `id`. Returns the node that took it, if any.
    pub(crate) fn take_token(
        &mut self,
        config: &ParserConfiguration,
        id: AppliedId,
        token: &Token,
    ) -> Option<AppliedId> {
        let taker = match token.kind {
            TokenKind::Argument => self.take_argument(config, id, token),
            TokenKind::Option | TokenKind::Command => self.take_option_or_command(config, id, token),
            TokenKind::Operand | TokenKind::EndOfArguments => None,
        };
        if !self.is_command(config.grammar(), id) {
            self.nodes[id.index()].state = ArgumentState::Closed;
        }
        taker
    }

    fn is_command(&self, grammar: &Grammar, id: AppliedId) -> bool {
        grammar.node(self.node(id).option).is_command()
    }

    fn take_argument(
        &mut self,
        config: &ParserConfiguration,
        id: AppliedId,
        token: &Token,
    ) -> Option<AppliedId> {
        let grammar = config.grammar();
        let is_command = self.is_command(grammar, id);
        if self.node(id).state == ArgumentState::Closed && !is_command {
            return None;
        }

        for child in self.node(id).children.clone() {
            if let Some(taker) = self.take_token(config, child, token) {
                return Some(taker);
            }
        }

        let children = self.child_options(id);
        match try_accept(grammar, config.messages(), self.node(id), &children, &token.value) {
            Ok(arguments) => {
                trace!(
                    option = grammar.node(self.node(id).option).name(),
                    argument = %token.value,
                    "argument accepted"
                );
                let node = &mut self.nodes[id.index()];
                node.arguments = arguments;
                if !is_command {
                    node.state = ArgumentState::Closed;
                }
                Some(id)
            }
            Err(rejected) => {
                trace!(
                    option = grammar.node(self.node(id).option).name(),
                    argument = %rejected.token,
                    reason = %rejected.reason,
                    "argument rejected"
                );
                None
            }
        }
    }

    fn take_option_or_command(
        &mut self,
        config: &ParserConfiguration,
        id: AppliedId,
        token: &Token,
    ) -> Option<AppliedId> {
        let grammar = config.grammar();
        let alias = token.value.as_str();
        let children = self.node(id).children.clone();

        if let Some(&child) = children
            .iter()
            .find(|&&child| grammar.find_raw(Some(self.node(child).option), alias).is_some())
        {
            return self.take_token(config, child, token);
        }

        if token.kind == TokenKind::Command
            && children.iter().any(|&child| {
                let option = grammar.node(self.node(child).option);
                option.is_command() && !option.has_alias(alias)
            })
        {
            return None;
        }

        if let Some(&child) = children
            .iter()
            .find(|&&child| grammar.node(self.node(child).option).has_raw_alias(alias))
        {
            trace!(alias, "option respecified");
            self.respecify(child);
            return Some(child);
        }

        let option = grammar.find_raw(Some(self.node(id).option), alias)?;
        trace!(alias, "option applied");
        Some(self.apply(option, alias, Some(id)))
    }
}

/// Read-only view of one applied node.
#[derive(Clone, Copy)]
pub struct AppliedOption<'a> {
    tree: &'a AppliedTree,
    config: &'a ParserConfiguration,
    id: AppliedId,
}

impl fmt::Debug for AppliedOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppliedOption")
            .field("name", &self.name())
            .field("token", &self.token())
            .field("arguments", &self.arguments())
            .field("children", &self.node().children.len())
            .finish()
    }
}

impl<'a> AppliedOption<'a> {
    pub(crate) fn new(tree: &'a AppliedTree, config: &'a ParserConfiguration, id: AppliedId) -> Self {
        Self { tree, config, id }
    }

    /// The node id.
    #[must_use]
    pub fn id(&self) -> AppliedId {
        self.id
    }

    /// The underlying arena node.
    #[must_use]
    pub fn node(&self) -> &'a AppliedNode {
        self.tree.node(self.id)
    }

    /// The grammar node.
    #[must_use]
    pub fn option(&self) -> &'a OptionNode {
        self.config.grammar().node(self.node().option)
    }

    /// The grammar node's name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.option().name()
    }

    /// The alias by which the option was first applied.
    #[must_use]
    pub fn token(&self) -> &'a str {
        self.node().token()
    }

    /// Returns true for commands.
    #[must_use]
    pub fn is_command(&self) -> bool {
        self.option().is_command()
    }

    /// Returns true if the node has the alias, with or without prefix.
    #[must_use]
    pub fn has_alias(&self, alias: &str) -> bool {
        self.option().has_alias(alias)
    }

    /// Consumed arguments, or the rule's default when none were consumed.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        self.tree
            .effective_arguments(self.config.grammar(), self.id)
            .values()
            .to_vec()
    }

    /// Applied children in application order.
    pub fn children(&self) -> impl Iterator<Item = AppliedOption<'a>> + 'a {
        let tree = self.tree;
        let config = self.config;
        self.node()
            .children
            .iter()
            .map(move |&id| AppliedOption::new(tree, config, id))
    }

    /// The applied parent, if any.
    #[must_use]
    pub fn parent(&self) -> Option<AppliedOption<'a>> {
        self.node()
            .parent
            .map(|id| AppliedOption::new(self.tree, self.config, id))
    }

    /// The applied child answering to `alias`.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<AppliedOption<'a>> {
        self.children().find(|child| child.has_alias(alias))
    }

    /// Returns true if a child answering to `alias` was applied.
    #[must_use]
    pub fn has_option(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Materializes the arguments with the rule's materializer.
    ///
    /// # Errors
    ///
    /// Returns `Materialization` if the materializer fails.
    pub fn raw_value(&self) -> Result<Value> {
        let arguments = self.arguments();
        self.option()
            .rule()
            .materialize(&arguments)
            .map_err(|message| Error::materialization(self.name(), arguments, message))
    }

    /// Materializes and converts the value.
    ///
    /// # Errors
    ///
    /// Returns `Materialization` if materializing or converting fails.
    pub fn value<T>(&self) -> Result<T>
    where
        T: TryFrom<Value, Error = Error>,
    {
        let value = self.raw_value()?;
        T::try_from(value).map_err(|err| {
            Error::materialization(self.name(), self.arguments(), err.to_string())
        })
    }

    /// The value of the child answering to `alias`, if it was applied.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAlias` if no child of this option's grammar node has
    /// the alias, and `Materialization` if the child's value cannot be
    /// produced.
    pub fn value_of<T>(&self, alias: &str) -> Result<Option<T>>
    where
        T: TryFrom<Value, Error = Error>,
    {
        match self.get(alias) {
            Some(child) => child.value().map(Some),
            None if self.config.grammar().find(Some(self.node().option), alias).is_some() => {
                Ok(None)
            }
            None => Err(Error::unknown_alias(alias)),
        }
    }

    /// Arguments of the child answering to `alias`; empty if not applied.
    #[must_use]
    pub fn arguments_of(&self, alias: &str) -> Vec<String> {
        self.get(alias)
            .map(|child| child.arguments())
            .unwrap_or_default()
    }

    /// Re-runs full validation over this node and its descendants,
    /// breadth-first.
    #[must_use]
    pub fn validate_all(&self) -> Vec<OptionError> {
        self.tree
            .breadth_first_from(&[self.id])
            .into_iter()
            .filter_map(|id| {
                self.tree.validate(self.config, id).map(|message| {
                    OptionError::new(message, self.tree.node(id).token(), Some(id))
                })
            })
            .collect()
    }

    /// Appends `[ name child… <arg>… ]` to `out`.
    pub fn write_diagram(&self, out: &mut String) {
        out.push_str("[ ");
        out.push_str(self.name());
        for child in self.children() {
            out.push(' ');
            child.write_diagram(out);
        }
        for argument in self.arguments() {
            out.push_str(" <");
            out.push_str(&argument);
            out.push('>');
        }
        out.push_str(" ]");
    }
}
